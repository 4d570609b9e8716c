//! Audit log service
//!
//! `AuditService` is the write facade for the audit subsystem:
//! - entries are queued on an mpsc channel and persisted by [`AuditWorker`]
//! - queries read the table directly
//!
//! [`AuditWorker`]: super::worker::AuditWorker

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::mpsc;

use super::types::{AuditAction, AuditEntry, AuditQuery};
use crate::db::repository::{RepoResult, audit};

/// Log request sent to the background worker
pub struct AuditLogRequest {
    pub action: AuditAction,
    pub method: String,
    pub path: String,
    pub caller_ip: String,
    pub latency_ms: i64,
    pub details: serde_json::Value,
}

/// Audit log service
///
/// Receives log requests over an mpsc channel and hands them to a
/// background worker. Queries read the table directly.
pub struct AuditService {
    pool: SqlitePool,
    tx: mpsc::Sender<AuditLogRequest>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService").finish_non_exhaustive()
    }
}

impl AuditService {
    pub fn new(pool: SqlitePool, buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<AuditLogRequest>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        let service = Arc::new(Self { pool, tx });
        (service, rx)
    }

    /// Record an entry triggered by an HTTP call (non-blocking)
    ///
    /// If the channel is full this waits; audit entries must not be dropped.
    pub async fn log_call(
        &self,
        action: AuditAction,
        method: impl Into<String>,
        path: impl Into<String>,
        caller_ip: impl Into<String>,
        latency_ms: i64,
        details: serde_json::Value,
    ) {
        let req = AuditLogRequest {
            action,
            method: method.into(),
            path: path.into(),
            caller_ip: caller_ip.into(),
            latency_ms,
            details,
        };
        if self.tx.send(req).await.is_err() {
            tracing::error!("Audit log channel closed, audit entry lost!");
        }
    }

    /// Record a system event with no triggering HTTP call
    pub async fn log_system(&self, action: AuditAction, details: serde_json::Value) {
        self.log_call(action, "", "", "", 0, details).await;
    }

    /// Write an entry directly, bypassing the channel.
    ///
    /// Used at shutdown when the worker may already be gone.
    pub async fn log_sync(&self, action: AuditAction, details: serde_json::Value) -> RepoResult<i64> {
        audit::append(&self.pool, action, "", "", "", 0, &details).await
    }

    /// Query audit entries
    pub async fn query(&self, q: &AuditQuery) -> RepoResult<(Vec<AuditEntry>, i64)> {
        audit::query(&self.pool, q).await
    }
}
