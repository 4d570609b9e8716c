//! Audit log type definitions
//!
//! Every inbound webhook call and every order mutation gets an immutable
//! entry. Entries are append-only; there is no update or delete path.

use serde::{Deserialize, Serialize};

/// Audit action types (enumerated, not free text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ===== System lifecycle =====
    SystemStartup,
    SystemShutdown,

    // ===== Inbound traffic =====
    /// Webhook call received (logged for every call, success or not)
    WebhookReceived,

    // ===== Orders =====
    OrderCreated,
    OrderEdited,
    OrderCancelled,

    // ===== Degraded side effects =====
    /// Carrier refused or failed the shipment request
    ShipmentFailed,
    /// Carrier refused or failed a cancellation
    ShipmentCancelFailed,
    /// WhatsApp confirmation could not be dispatched
    NotificationFailed,
    /// Lead bookkeeping after an order did not go through
    LeadUpdateFailed,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SystemStartup" => Ok(Self::SystemStartup),
            "SystemShutdown" => Ok(Self::SystemShutdown),
            "WebhookReceived" => Ok(Self::WebhookReceived),
            "OrderCreated" => Ok(Self::OrderCreated),
            "OrderEdited" => Ok(Self::OrderEdited),
            "OrderCancelled" => Ok(Self::OrderCancelled),
            "ShipmentFailed" => Ok(Self::ShipmentFailed),
            "ShipmentCancelFailed" => Ok(Self::ShipmentCancelFailed),
            "NotificationFailed" => Ok(Self::NotificationFailed),
            "LeadUpdateFailed" => Ok(Self::LeadUpdateFailed),
            other => Err(format!("Unknown audit action: {other}")),
        }
    }
}

/// Audit log entry (immutable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Globally increasing sequence number
    pub id: i64,
    /// Unix millis
    pub timestamp: i64,
    pub action: AuditAction,
    /// HTTP method of the triggering call ("" for system events)
    pub method: String,
    /// Request path of the triggering call ("" for system events)
    pub path: String,
    /// Caller IP ("" for system events)
    pub caller_ip: String,
    /// End-to-end handling latency in milliseconds
    pub latency_ms: i64,
    /// Structured detail payload
    pub details: serde_json::Value,
}

/// Audit log query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AuditQuery {
    /// Start timestamp (Unix millis, inclusive)
    pub from: Option<i64>,
    /// End timestamp (Unix millis, inclusive)
    pub to: Option<i64>,
    /// Action filter
    pub action: Option<AuditAction>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

// Manual impl so direct construction gets the same page size as
// deserialized queries; a derived Default would mean LIMIT 0.
impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            action: None,
            offset: 0,
            limit: default_limit(),
        }
    }
}

fn default_limit() -> i64 {
    50
}

/// Audit log list response
#[derive(Debug, Serialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditEntry>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_roundtrip() {
        let action = AuditAction::WebhookReceived;
        let parsed: AuditAction = action.to_string().parse().unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!("NotAThing".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_default_query_requests_a_page() {
        let q = AuditQuery::default();
        assert_eq!(q.limit, 50);
        assert_eq!(q.offset, 0);
        assert!(q.action.is_none());
    }
}
