use crate::types::ChampionStat;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Connect to the cache database and ensure the schema exists.
///
/// Accepts a plain file path or a full sqlite URL. In-memory databases
/// exist per connection, so the pool is capped at a single connection for
/// those.
pub async fn init_cache(database: &str) -> Result<SqlitePool, String> {
    let db_url = if database.starts_with("sqlite:") {
        database.to_string()
    } else {
        format!("sqlite:{database}?mode=rwc")
    };

    let max_connections = if db_url.contains(":memory:") { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&db_url)
        .await
        .map_err(|e| format!("Failed to connect to cache database: {e}"))?;

    // Enable WAL mode for better concurrent read performance
    sqlx::query("PRAGMA journal_mode=WAL;")
        .execute(&pool)
        .await
        .map_err(|e| format!("Failed to set WAL mode: {e}"))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS champ_cache (
            summoner TEXT PRIMARY KEY,
            timestamp REAL NOT NULL,
            data TEXT NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .map_err(|e| format!("Failed to create cache table: {e}"))?;

    Ok(pool)
}

/// Return the cached stats for a summoner if the entry is still fresh.
///
/// Freshness is `now - timestamp < ttl_secs`, strictly: an entry exactly
/// `ttl_secs` old is stale. A missing row or an unreadable payload is a
/// miss, not an error.
pub async fn lookup(
    pool: &SqlitePool,
    summoner: &str,
    ttl_secs: f64,
    now: f64,
) -> Result<Option<Vec<ChampionStat>>, String> {
    let row: Option<(f64, String)> =
        sqlx::query_as("SELECT timestamp, data FROM champ_cache WHERE summoner = ?")
            .bind(summoner)
            .fetch_optional(pool)
            .await
            .map_err(|e| format!("Cache read failed for {summoner}: {e}"))?;

    let Some((timestamp, data)) = row else {
        return Ok(None);
    };

    if now - timestamp >= ttl_secs {
        return Ok(None);
    }

    Ok(serde_json::from_str(&data).ok())
}

/// Overwrite the cache entry for a summoner. One row per summoner; last
/// writer wins. The single-statement REPLACE never exposes a partially
/// written entry.
pub async fn store(
    pool: &SqlitePool,
    summoner: &str,
    now: f64,
    stats: &[ChampionStat],
) -> Result<(), String> {
    let payload = serde_json::to_string(stats)
        .map_err(|e| format!("Failed to serialize stats for {summoner}: {e}"))?;

    sqlx::query("REPLACE INTO champ_cache (summoner, timestamp, data) VALUES (?, ?, ?)")
        .bind(summoner)
        .bind(now)
        .bind(payload)
        .execute(pool)
        .await
        .map_err(|e| format!("Cache write failed for {summoner}: {e}"))?;

    Ok(())
}
