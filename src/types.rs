use serde::{Deserialize, Serialize};

/// One champion's winrate as scraped from the stats site, 0–100 with one
/// decimal of source precision. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionStat {
    pub name: String,
    pub winrate: f64,
}

/// Per-summoner outcome of one fetch. A failed or empty fetch carries the
/// reason but never aborts the sibling fetches.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Stats(Vec<ChampionStat>),
    NoData(String),
}

#[derive(Debug, Clone)]
pub struct SummonerResult {
    pub summoner: String,
    pub outcome: FetchOutcome,
}

/// One named field of the outgoing report, rendered by the presenter.
#[derive(Debug, Clone, Serialize)]
pub struct ReportField {
    pub name: String,
    pub value: String,
}

/// Which path produced the ban recommendation. The presenter renders the
/// two sources distinguishably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Ai,
    Fallback,
}

/// Final output of one command invocation: one field per summoner plus the
/// recommendation text.
#[derive(Debug, Clone, Serialize)]
pub struct BanReport {
    pub fields: Vec<ReportField>,
    pub recommendation: String,
    pub source: RecommendationSource,
}
