//! Audit log repository

use super::RepoResult;
use crate::audit::types::{AuditAction, AuditEntry, AuditQuery};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: i64,
    timestamp: i64,
    action: String,
    method: String,
    path: String,
    caller_ip: String,
    latency_ms: i64,
    details: String,
}

impl AuditRow {
    fn into_entry(self) -> Option<AuditEntry> {
        let action = self.action.parse().ok()?;
        let details = serde_json::from_str(&self.details).unwrap_or(serde_json::Value::Null);
        Some(AuditEntry {
            id: self.id,
            timestamp: self.timestamp,
            action,
            method: self.method,
            path: self.path,
            caller_ip: self.caller_ip,
            latency_ms: self.latency_ms,
            details,
        })
    }
}

/// Append a new entry; `id` is assigned by the database
#[allow(clippy::too_many_arguments)]
pub async fn append(
    pool: &SqlitePool,
    action: AuditAction,
    method: &str,
    path: &str,
    caller_ip: &str,
    latency_ms: i64,
    details: &serde_json::Value,
) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO audit_log (timestamp, action, method, path, caller_ip, latency_ms, details) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(now)
    .bind(action.to_string())
    .bind(method)
    .bind(path)
    .bind(caller_ip)
    .bind(latency_ms)
    .bind(details.to_string())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Query entries newest-first with optional time/action filters
pub async fn query(pool: &SqlitePool, q: &AuditQuery) -> RepoResult<(Vec<AuditEntry>, i64)> {
    let from = q.from.unwrap_or(0);
    let to = q.to.unwrap_or(i64::MAX);
    let action = q.action.map(|a| a.to_string());

    let rows = sqlx::query_as::<_, AuditRow>(
        "SELECT id, timestamp, action, method, path, caller_ip, latency_ms, details FROM audit_log WHERE timestamp >= ? AND timestamp <= ? AND (? IS NULL OR action = ?) ORDER BY id DESC LIMIT ? OFFSET ?",
    )
    .bind(from)
    .bind(to)
    .bind(&action)
    .bind(&action)
    .bind(q.limit)
    .bind(q.offset)
    .fetch_all(pool)
    .await?;

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM audit_log WHERE timestamp >= ? AND timestamp <= ? AND (? IS NULL OR action = ?)",
    )
    .bind(from)
    .bind(to)
    .bind(&action)
    .bind(&action)
    .fetch_one(pool)
    .await?;

    let entries = rows.into_iter().filter_map(AuditRow::into_entry).collect();
    Ok((entries, total))
}
