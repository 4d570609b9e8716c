//! Carrier OAuth token record

use serde::{Deserialize, Serialize};

/// Persisted carrier access token
///
/// `expiry` already includes the safety margin subtracted at write time,
/// so a token is usable iff `expiry > now`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CarrierToken {
    pub id: i64,
    pub token: String,
    /// Unix millis after which the token must not be used
    pub expiry: i64,
    /// Unix millis
    pub created_at: i64,
}

impl CarrierToken {
    /// Whether the token is still usable at `now` (unix millis)
    pub fn is_fresh(&self, now: i64) -> bool {
        self.expiry > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness() {
        let t = CarrierToken {
            id: 1,
            token: "abc".to_string(),
            expiry: 1_000,
            created_at: 0,
        };
        assert!(t.is_fresh(999));
        assert!(!t.is_fresh(1_000));
        assert!(!t.is_fresh(2_000));
    }
}
