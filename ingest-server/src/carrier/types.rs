//! Carrier wire types
//!
//! Request and response bodies for the carrier's OAuth and order APIs.
//! Field names follow the carrier's JSON contract exactly.

use serde::{Deserialize, Serialize};

/// Address lines longer than this are split across address1/address2
pub const ADDRESS_LINE_LIMIT: usize = 100;

// ===== OAuth =====

#[derive(Debug, Serialize)]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: &'static str,
}

impl TokenRequest {
    pub fn client_credentials(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            grant_type: "client_credentials",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

// ===== Shipment creation =====

#[derive(Debug, Clone, Serialize)]
pub struct ShipmentRequest {
    /// Our sale ID doubles as the carrier tracking number
    pub requested_tracking_number: String,
    pub service_type: &'static str,
    pub service_level: &'static str,
    pub from: Contact,
    pub to: Contact,
    pub parcel_job: ParcelJob,
}

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub name: String,
    pub phone_number: String,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub address1: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address2: String,
    pub postcode: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Address {
    /// Build an address block, splitting a long address line at the
    /// carrier's per-line limit.
    pub fn new(line: &str, postcode: &str, city: &str, state: &str, country: &str) -> Self {
        let (address1, address2) = split_address(line);
        Self {
            address1,
            address2,
            postcode: postcode.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            country: country.to_string(),
        }
    }
}

/// Split an address at the line limit, preferring a space boundary
pub fn split_address(line: &str) -> (String, String) {
    if line.chars().count() <= ADDRESS_LINE_LIMIT {
        return (line.to_string(), String::new());
    }
    let head: String = line.chars().take(ADDRESS_LINE_LIMIT).collect();
    let cut = head.rfind(' ').unwrap_or(head.len());
    let (first, rest) = line.split_at(cut);
    (
        first.trim_end().to_string(),
        rest.trim_start().to_string(),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct ParcelJob {
    pub is_pickup_required: bool,
    /// YYYY-MM-DD, business timezone
    pub pickup_date: String,
    /// YYYY-MM-DD, business timezone
    pub delivery_start_date: String,
    /// Collected on delivery; 0 unless the order is cash-on-delivery
    pub cash_on_delivery: f64,
    pub insured_value: f64,
    pub delivery_instructions: String,
}

#[derive(Debug, Deserialize)]
pub struct ShipmentResponse {
    pub tracking_number: String,
}

/// Error body shape the carrier returns on non-success statuses
#[derive(Debug, Deserialize)]
pub struct CarrierErrorBody {
    #[serde(default)]
    pub error: Option<CarrierErrorDetail>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CarrierErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl CarrierErrorBody {
    /// Best-effort extraction of the human-readable carrier message
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .or(self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address_not_split() {
        let (a, b) = split_address("No 1 Jalan Besar, Kulai");
        assert_eq!(a, "No 1 Jalan Besar, Kulai");
        assert!(b.is_empty());
    }

    #[test]
    fn test_long_address_split_on_space() {
        let long = "Lot 12345 Jalan Sangat Panjang Sekali Taman Perindustrian Baru Fasa Dua Belas Kawasan Perusahaan Ringan Senai Johor";
        assert!(long.len() > ADDRESS_LINE_LIMIT);
        let (a, b) = split_address(long);
        assert!(a.chars().count() <= ADDRESS_LINE_LIMIT);
        assert!(!b.is_empty());
        assert!(!a.ends_with(' '));
        assert!(!b.starts_with(' '));
        // no characters lost besides the boundary space
        assert_eq!(format!("{a} {b}"), long);
    }

    #[test]
    fn test_error_body_shapes() {
        let nested: CarrierErrorBody =
            serde_json::from_str(r#"{"error": {"message": "invalid postcode"}}"#).unwrap();
        assert_eq!(nested.message(), Some("invalid postcode"));

        let flat: CarrierErrorBody =
            serde_json::from_str(r#"{"message": "unauthorized"}"#).unwrap();
        assert_eq!(flat.message(), Some("unauthorized"));

        let empty: CarrierErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.message(), None);
    }
}
