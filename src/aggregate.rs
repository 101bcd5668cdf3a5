use crate::opgg;
use crate::types::{ChampionStat, FetchOutcome, ReportField, SummonerResult};
use crate::AppContext;
use futures::future::join_all;

/// Sentinel used in summary lines and report fields for failed or empty
/// results.
pub const NO_DATA: &str = "no data";

/// Fetch stats for every summoner concurrently.
///
/// Each fetch is independent: a network error, parse failure, or empty page
/// becomes a `NoData` outcome for that summoner and never cancels or affects
/// the siblings. Output order equals input order.
pub async fn fetch_all(ctx: &AppContext, summoners: &[String]) -> Vec<SummonerResult> {
    let fetches = summoners.iter().map(|s| opgg::fetch_champion_stats(ctx, s));
    let outcomes = join_all(fetches).await;

    summoners
        .iter()
        .zip(outcomes)
        .map(|(summoner, outcome)| {
            let outcome = match outcome {
                Ok(stats) if !stats.is_empty() => FetchOutcome::Stats(stats),
                Ok(_) => FetchOutcome::NoData("no champion stats found".to_string()),
                Err(e) => {
                    eprintln!("Fetch failed for {summoner}: {e}");
                    FetchOutcome::NoData(e)
                }
            };
            SummonerResult {
                summoner: summoner.clone(),
                outcome,
            }
        })
        .collect()
}

fn format_stats(stats: &[ChampionStat]) -> String {
    stats
        .iter()
        .map(|c| format!("{} ({:.1}%)", c.name, c.winrate))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the flat text summary handed to the recommender: one line per
/// summoner, a sentinel line for failed or empty results. All five failing
/// still yields five sentinel lines — the pipeline always proceeds.
pub fn build_summary(results: &[SummonerResult]) -> String {
    results
        .iter()
        .map(|r| match &r.outcome {
            FetchOutcome::Stats(stats) => format!("{}: {}", r.summoner, format_stats(stats)),
            FetchOutcome::NoData(_) => format!("{}: {NO_DATA}", r.summoner),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the per-summoner fields of the outgoing report.
pub fn build_report_fields(results: &[SummonerResult]) -> Vec<ReportField> {
    results
        .iter()
        .map(|r| ReportField {
            name: r.summoner.clone(),
            value: match &r.outcome {
                FetchOutcome::Stats(stats) => format_stats(stats),
                FetchOutcome::NoData(_) => format!("⚠️ {NO_DATA}"),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache;
    use crate::config::Config;
    use chrono::Utc;

    fn stat(name: &str, winrate: f64) -> ChampionStat {
        ChampionStat {
            name: name.to_string(),
            winrate,
        }
    }

    fn success(summoner: &str, stats: Vec<ChampionStat>) -> SummonerResult {
        SummonerResult {
            summoner: summoner.to_string(),
            outcome: FetchOutcome::Stats(stats),
        }
    }

    fn failure(summoner: &str) -> SummonerResult {
        SummonerResult {
            summoner: summoner.to_string(),
            outcome: FetchOutcome::NoData("timeout".to_string()),
        }
    }

    async fn test_ctx(region: &str) -> AppContext {
        let config = Config {
            region: region.to_string(),
            cache_ttl_secs: 300.0,
            cache_db: "sqlite::memory:".to_string(),
            openai_api_key: None,
            openai_api_base: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
        };
        AppContext::new(config).await.unwrap()
    }

    // ---- build_summary ----

    #[test]
    fn test_summary_line_per_summoner() {
        let results = vec![
            success("alpha", vec![stat("Ahri", 55.5), stat("Zed", 48.2)]),
            failure("bravo"),
        ];
        let summary = build_summary(&results);
        assert_eq!(summary, "alpha: Ahri (55.5%), Zed (48.2%)\nbravo: no data");
    }

    #[test]
    fn test_summary_formats_whole_winrates_with_one_decimal() {
        let results = vec![success("alpha", vec![stat("Lux", 60.0)])];
        assert_eq!(build_summary(&results), "alpha: Lux (60.0%)");
    }

    #[test]
    fn test_summary_all_failed_is_all_sentinels() {
        let results: Vec<SummonerResult> =
            ["a", "b", "c", "d", "e"].iter().map(|s| failure(s)).collect();
        let summary = build_summary(&results);
        assert_eq!(summary.lines().count(), 5);
        assert!(summary.lines().all(|l| l.ends_with(": no data")));
    }

    // ---- build_report_fields ----

    #[test]
    fn test_report_fields_mark_missing_data() {
        let results = vec![success("alpha", vec![stat("Ahri", 55.5)]), failure("bravo")];
        let fields = build_report_fields(&results);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "alpha");
        assert_eq!(fields[0].value, "Ahri (55.5%)");
        assert_eq!(fields[1].value, "⚠️ no data");
    }

    // ---- fetch_all ----

    #[tokio::test]
    async fn test_fetch_all_serves_fresh_entries_from_cache() {
        // Every summoner is cached and fresh, so no network call happens
        // even though the region does not resolve anywhere.
        let ctx = test_ctx("nowhere invalid").await;
        let now = Utc::now().timestamp_millis() as f64 / 1000.0;
        let summoners: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for (i, s) in summoners.iter().enumerate() {
            let stats = vec![stat("Ahri", 50.0 + i as f64)];
            cache::store(&ctx.pool, s, now, &stats).await.unwrap();
        }

        let results = fetch_all(&ctx, &summoners).await;
        assert_eq!(results.len(), 5);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.summoner, summoners[i]);
            match &r.outcome {
                FetchOutcome::Stats(stats) => assert_eq!(stats[0].winrate, 50.0 + i as f64),
                FetchOutcome::NoData(reason) => panic!("unexpected failure: {reason}"),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_a_single_failure() {
        // Four summoners are cache-fresh; the fifth misses the cache and its
        // fetch fails (the region makes an unusable URL). The failure must
        // not affect the other four, and the summary gets exactly one
        // sentinel line.
        let ctx = test_ctx("nowhere invalid").await;
        let now = Utc::now().timestamp_millis() as f64 / 1000.0;
        let summoners: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for s in &summoners[..4] {
            cache::store(&ctx.pool, s, now, &[stat("Ahri", 55.5)])
                .await
                .unwrap();
        }

        let results = fetch_all(&ctx, &summoners).await;
        assert_eq!(results.len(), 5);

        let populated = results
            .iter()
            .filter(|r| matches!(r.outcome, FetchOutcome::Stats(_)))
            .count();
        assert_eq!(populated, 4);
        assert!(matches!(results[4].outcome, FetchOutcome::NoData(_)));

        let summary = build_summary(&results);
        let sentinel_lines = summary.lines().filter(|l| l.ends_with(": no data")).count();
        assert_eq!(sentinel_lines, 1);
    }

    #[tokio::test]
    async fn test_fetch_all_treats_cached_empty_bundle_as_no_data() {
        let ctx = test_ctx("nowhere invalid").await;
        let now = Utc::now().timestamp_millis() as f64 / 1000.0;
        let summoners: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for s in &summoners {
            cache::store(&ctx.pool, s, now, &[]).await.unwrap();
        }

        let results = fetch_all(&ctx, &summoners).await;
        assert!(results
            .iter()
            .all(|r| matches!(r.outcome, FetchOutcome::NoData(_))));
    }
}
