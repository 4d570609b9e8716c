//! Carrier token repository
//!
//! Tokens survive process restarts; the newest row wins.

use super::RepoResult;
use shared::models::CarrierToken;
use sqlx::SqlitePool;

pub async fn find_latest(pool: &SqlitePool) -> RepoResult<Option<CarrierToken>> {
    let row = sqlx::query_as::<_, CarrierToken>(
        "SELECT id, token, expiry, created_at FROM carrier_tokens ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn insert(pool: &SqlitePool, token: &str, expiry: i64) -> RepoResult<CarrierToken> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO carrier_tokens (id, token, expiry, created_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(token)
        .bind(expiry)
        .bind(now)
        .execute(pool)
        .await?;
    Ok(CarrierToken {
        id,
        token: token.to_string(),
        expiry,
        created_at: now,
    })
}

/// Drop stale rows, keeping the table from growing without bound
pub async fn prune_expired(pool: &SqlitePool, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM carrier_tokens WHERE expiry <= ?")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
