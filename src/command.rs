use crate::aggregate;
use crate::link::{self, LinkError};
use crate::recommend;
use crate::types::BanReport;
use crate::AppContext;

/// Run the full multi-link analysis: parse the link, fetch the five
/// summoners concurrently, summarize, and recommend bans.
///
/// Only the two link validation errors are returned to the caller. Every
/// downstream failure — fetch, parse, or AI — degrades into the report
/// itself rather than failing the invocation.
pub async fn analyze_multi_link(ctx: &AppContext, link: &str) -> Result<BanReport, LinkError> {
    let summoners = link::parse_multi_link(link)?;
    let results = aggregate::fetch_all(ctx, &summoners).await;
    let summary = aggregate::build_summary(&results);
    let (recommendation, source) = recommend::recommend_bans(ctx, &summary, &results).await;

    Ok(BanReport {
        fields: aggregate::build_report_fields(&results),
        recommendation,
        source,
    })
}
