//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 4xxx: Order errors
/// - 5xxx: Lead errors
/// - 6xxx: Bundle/pricing errors
/// - 7xxx: Carrier errors
/// - 8xxx: Messaging errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Order errors (4xxx)
    Order,
    /// Lead errors (5xxx)
    Lead,
    /// Bundle/pricing errors (6xxx)
    Bundle,
    /// Carrier errors (7xxx)
    Carrier,
    /// Messaging errors (8xxx)
    Messaging,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..4000 => Self::General,
            4000..5000 => Self::Order,
            5000..6000 => Self::Lead,
            6000..7000 => Self::Bundle,
            7000..8000 => Self::Carrier,
            8000..9000 => Self::Messaging,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Order => "order",
            Self::Lead => "lead",
            Self::Bundle => "bundle",
            Self::Carrier => "carrier",
            Self::Messaging => "messaging",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(9), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Lead);
        assert_eq!(ErrorCategory::from_code(6002), ErrorCategory::Bundle);
        assert_eq!(ErrorCategory::from_code(7003), ErrorCategory::Carrier);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Messaging);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::SaleIdConflict.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::LeadNotFound.category(), ErrorCategory::Lead);
        assert_eq!(ErrorCode::BundleNotFound.category(), ErrorCategory::Bundle);
        assert_eq!(ErrorCode::CarrierAuthFailed.category(), ErrorCategory::Carrier);
        assert_eq!(ErrorCode::MessageSendFailed.category(), ErrorCategory::Messaging);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Carrier).unwrap();
        assert_eq!(json, "\"carrier\"");
        let category: ErrorCategory = serde_json::from_str("\"messaging\"").unwrap();
        assert_eq!(category, ErrorCategory::Messaging);
    }
}
