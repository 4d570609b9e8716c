//! Daily sale sequence repository
//!
//! One counter row per business-local date. The increment is a single
//! UPSERT so concurrent order creation can never hand out the same
//! sequence number twice.

use super::RepoResult;
use sqlx::SqlitePool;

/// Atomically claim the next sequence number for `seq_date` (YYMMDD)
pub async fn next(pool: &SqlitePool, seq_date: &str) -> RepoResult<i64> {
    let (seq,): (i64,) = sqlx::query_as(
        "INSERT INTO sale_sequences (seq_date, seq) VALUES (?, 1) ON CONFLICT(seq_date) DO UPDATE SET seq = seq + 1 RETURNING seq",
    )
    .bind(seq_date)
    .fetch_one(pool)
    .await?;
    Ok(seq)
}

/// Current counter value without claiming (0 if no orders today)
pub async fn current(pool: &SqlitePool, seq_date: &str) -> RepoResult<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT seq FROM sale_sequences WHERE seq_date = ?")
        .bind(seq_date)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(s,)| s).unwrap_or(0))
}
