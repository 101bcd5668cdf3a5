use crate::cache;
use crate::types::ChampionStat;
use crate::AppContext;
use chrono::Utc;
use scraper::{Html, Selector};

const USER_AGENT: &str = "DraftScout/1.0";

/// The profile page lists at most this many champions worth keeping.
const TOP_CHAMPIONS: usize = 5;

/// Build the op.gg profile URL for a summoner in a region.
fn profile_url(region: &str, summoner: &str) -> String {
    format!("https://{region}.op.gg/summoners/{region}/{summoner}")
}

/// Parse a winrate cell like "55.5%" into a percentage value.
fn parse_ratio(text: &str) -> Option<f64> {
    text.trim().trim_end_matches('%').parse::<f64>().ok()
}

/// Extract champion winrates from a summoner profile page.
///
/// The page carries two positionally aligned lists of champion names and
/// winrate strings. Pairs whose ratio cell does not parse as a percentage
/// are skipped; the rest are kept in page order, truncated to the top five.
/// The markup is an external contract that changes without notice, which is
/// why all knowledge of it lives in this one function.
pub fn parse_champion_page(html: &str) -> Vec<ChampionStat> {
    let document = Html::parse_document(html);
    let name_sel = Selector::parse(".ChampionName").unwrap();
    let ratio_sel = Selector::parse(".ChampionRatio").unwrap();

    let names: Vec<String> = document
        .select(&name_sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    let ratios: Vec<String> = document
        .select(&ratio_sel)
        .map(|el| el.text().collect::<String>())
        .collect();

    names
        .into_iter()
        .zip(ratios)
        .filter_map(|(name, ratio)| {
            parse_ratio(&ratio).map(|winrate| ChampionStat { name, winrate })
        })
        .take(TOP_CHAMPIONS)
        .collect()
}

async fn fetch_profile_html(ctx: &AppContext, summoner: &str) -> Result<String, String> {
    let url = profile_url(&ctx.config.region, summoner);

    let resp = ctx
        .client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .map_err(|e| format!("Network error fetching {summoner}: {e}"))?;

    if !resp.status().is_success() {
        return Err(format!("op.gg returned {} for {summoner}", resp.status()));
    }

    resp.text()
        .await
        .map_err(|e| format!("Failed to read profile page for {summoner}: {e}"))
}

/// Fetch a summoner's top champion stats, consulting the TTL cache first.
///
/// A fresh cache hit returns immediately with no network call. On a miss or
/// a stale entry, one GET is issued and the parsed result — even an empty
/// one — overwrites the cache entry before returning.
pub async fn fetch_champion_stats(
    ctx: &AppContext,
    summoner: &str,
) -> Result<Vec<ChampionStat>, String> {
    let now = Utc::now().timestamp_millis() as f64 / 1000.0;

    if let Some(stats) = cache::lookup(&ctx.pool, summoner, ctx.config.cache_ttl_secs, now).await? {
        return Ok(stats);
    }

    let html = fetch_profile_html(ctx, summoner).await?;
    let stats = parse_champion_page(&html);
    cache::store(&ctx.pool, summoner, now, &stats).await?;

    Ok(stats)
}
