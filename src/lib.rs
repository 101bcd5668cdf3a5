pub mod aggregate;
pub mod cache;
pub mod command;
pub mod config;
pub mod link;
pub mod opgg;
pub mod recommend;
pub mod types;

use config::Config;
use reqwest::Client;
use sqlx::sqlite::SqlitePool;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared per-process dependencies: configuration, the cache pool, and one
/// HTTP client. Constructed once and passed by reference, so the pipeline
/// can be exercised in tests without a live network.
pub struct AppContext {
    pub config: Config,
    pub pool: SqlitePool,
    pub client: Client,
}

impl AppContext {
    pub async fn new(config: Config) -> Result<Self, String> {
        let pool = cache::init_cache(&config.cache_db).await?;
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            config,
            pool,
            client,
        })
    }
}
