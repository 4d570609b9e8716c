//! Audit log background worker
//!
//! Consumes AuditLogRequest from the mpsc channel and writes rows.
//! Exits when the channel closes.

use sqlx::SqlitePool;

use super::service::AuditLogRequest;
use crate::db::repository::audit;

/// Audit log background worker
pub struct AuditWorker {
    pool: SqlitePool,
}

impl AuditWorker {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run the worker (blocks until the channel closes)
    pub async fn run(self, mut rx: tokio::sync::mpsc::Receiver<AuditLogRequest>) {
        tracing::info!("Audit log worker started");

        while let Some(req) = rx.recv().await {
            match audit::append(
                &self.pool,
                req.action,
                &req.method,
                &req.path,
                &req.caller_ip,
                req.latency_ms,
                &req.details,
            )
            .await
            {
                Ok(id) => {
                    tracing::debug!(audit_id = id, action = %req.action, "Audit entry recorded");
                }
                Err(e) => {
                    tracing::error!("Failed to write audit entry: {:?}", e);
                }
            }
        }

        tracing::info!("Audit log channel closed, worker stopping");
    }
}
