use std::env;

const DEFAULT_REGION: &str = "euw";
const DEFAULT_CACHE_TTL_SECS: f64 = 300.0;
const DEFAULT_CACHE_DB: &str = "cache.db";
const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Runtime configuration, read once from the environment and passed in
/// explicitly wherever it is needed.
#[derive(Debug, Clone)]
pub struct Config {
    /// op.gg region subdomain, e.g. "euw" or "kr".
    pub region: String,
    /// Cache freshness window in seconds. An entry exactly this old is stale.
    pub cache_ttl_secs: f64,
    /// SQLite cache location: a file path or a full sqlite URL.
    pub cache_db: String,
    /// Missing key fails the AI call, which degrades to the fallback ranking.
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let cache_ttl_secs = match env::var("CACHE_TTL_SECS") {
            Ok(v) => v
                .parse::<f64>()
                .map_err(|e| format!("Invalid CACHE_TTL_SECS '{v}': {e}"))?,
            Err(_) => DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Self {
            region: env::var("RIOT_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            cache_ttl_secs,
            cache_db: env::var("CACHE_DB").unwrap_or_else(|_| DEFAULT_CACHE_DB.to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
        })
    }
}
