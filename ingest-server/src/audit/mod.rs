//! Audit subsystem
//!
//! Append-only record of inbound webhook calls, order mutations, and
//! degraded side effects. Writes go through an mpsc channel so request
//! handlers never block on the audit table.

pub mod service;
pub mod types;
pub mod worker;

pub use service::{AuditLogRequest, AuditService};
pub use types::{AuditAction, AuditEntry, AuditListResponse, AuditQuery};
pub use worker::AuditWorker;
