//! Unified error codes for the back-office core
//!
//! This module defines all error codes used across the ingest server and its
//! callers. Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Lead errors
//! - 6xxx: Bundle/pricing errors
//! - 7xxx: Carrier errors
//! - 8xxx: Messaging errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Phone number is invalid for the configured country
    InvalidPhoneNumber = 9,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Sale ID already taken (concurrent issuance collision)
    SaleIdConflict = 4002,
    /// Offered price is below the bundle's minimum for this tier
    PriceBelowMinimum = 4003,
    /// Order has already been shipped
    OrderAlreadyShipped = 4004,

    // ==================== 5xxx: Lead ====================
    /// Lead not found
    LeadNotFound = 5001,

    // ==================== 6xxx: Bundle ====================
    /// Bundle not found
    BundleNotFound = 6001,
    /// Bundle has an invalid price tier
    BundleInvalidPrice = 6002,

    // ==================== 7xxx: Carrier ====================
    /// Carrier credential endpoint rejected or unreachable
    CarrierAuthFailed = 7001,
    /// Carrier shipment request failed
    CarrierRequestFailed = 7002,
    /// Carrier shipment cancellation failed
    CarrierCancelFailed = 7003,

    // ==================== 8xxx: Messaging ====================
    /// Message gateway refused or failed to deliver
    MessageSendFailed = 8001,
    /// Message gateway unreachable
    MessageGatewayUnavailable = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::InvalidPhoneNumber => "Phone number is invalid",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::SaleIdConflict => "Sale ID already taken",
            ErrorCode::PriceBelowMinimum => "Offered price is below the tier minimum",
            ErrorCode::OrderAlreadyShipped => "Order has already been shipped",

            // Lead
            ErrorCode::LeadNotFound => "Lead not found",

            // Bundle
            ErrorCode::BundleNotFound => "Bundle not found",
            ErrorCode::BundleInvalidPrice => "Bundle has an invalid price tier",

            // Carrier
            ErrorCode::CarrierAuthFailed => "Carrier authentication failed",
            ErrorCode::CarrierRequestFailed => "Carrier shipment request failed",
            ErrorCode::CarrierCancelFailed => "Carrier shipment cancellation failed",

            // Messaging
            ErrorCode::MessageSendFailed => "Message delivery failed",
            ErrorCode::MessageGatewayUnavailable => "Message gateway unreachable",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::InvalidPhoneNumber),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::SaleIdConflict),
            4003 => Ok(ErrorCode::PriceBelowMinimum),
            4004 => Ok(ErrorCode::OrderAlreadyShipped),

            // Lead
            5001 => Ok(ErrorCode::LeadNotFound),

            // Bundle
            6001 => Ok(ErrorCode::BundleNotFound),
            6002 => Ok(ErrorCode::BundleInvalidPrice),

            // Carrier
            7001 => Ok(ErrorCode::CarrierAuthFailed),
            7002 => Ok(ErrorCode::CarrierRequestFailed),
            7003 => Ok(ErrorCode::CarrierCancelFailed),

            // Messaging
            8001 => Ok(ErrorCode::MessageSendFailed),
            8002 => Ok(ErrorCode::MessageGatewayUnavailable),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::CarrierAuthFailed.code(), 7001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_roundtrip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::RequiredField,
            ErrorCode::SaleIdConflict,
            ErrorCode::PriceBelowMinimum,
            ErrorCode::CarrierRequestFailed,
            ErrorCode::MessageSendFailed,
            ErrorCode::InternalError,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value).unwrap(), code);
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::SaleIdConflict).unwrap();
        assert_eq!(json, "4002");
        let code: ErrorCode = serde_json::from_str("7002").unwrap();
        assert_eq!(code, ErrorCode::CarrierRequestFailed);
    }
}
