use chrono_tz::Tz;
use shared::models::Platform;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | ./data/ingest.db | SQLite file path |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | BUSINESS_TIMEZONE | Asia/Kuala_Lumpur | All business dates computed here |
/// | COUNTRY_CODE | 60 | Phone normalization prefix |
/// | SALE_ID_PREFIX | MHSB | Carrier-facing sale ID prefix |
/// | DEFAULT_PLATFORM | FACEBOOK | Platform when a message names none |
/// | AUDIT_BUFFER_SIZE | 256 | Audit channel capacity |
/// | CARRIER_BASE_URL | https://api.ninjavan.my | Carrier API base |
/// | CARRIER_CLIENT_ID | (empty) | OAuth client id |
/// | CARRIER_CLIENT_SECRET | (empty) | OAuth client secret |
/// | CARRIER_TIMEOUT_MS | 15000 | Per-request carrier timeout |
/// | MESSAGING_GATEWAY_URL | (empty) | WhatsApp gateway base URL |
/// | MESSAGING_DEVICE_ID | (empty) | Gateway device / sender handle |
/// | SENDER_NAME | (empty) | Pickup contact name |
/// | SENDER_PHONE | (empty) | Pickup contact phone |
/// | SENDER_ADDRESS | (empty) | Pickup address line |
/// | SENDER_POSTCODE | (empty) | Pickup postcode |
/// | SENDER_CITY | (empty) | Pickup city |
/// | SENDER_STATE | (empty) | Pickup state |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/data/ingest.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Business timezone for sale IDs, lead dates and pickup scheduling
    pub timezone: Tz,
    /// Phone country code prepended during normalization
    pub country_code: String,
    /// Prefix for carrier-facing daily-sequential sale IDs
    pub sale_id_prefix: String,
    /// Platform assumed when an order message names none
    pub default_platform: Platform,
    /// Audit log channel capacity
    pub audit_buffer_size: usize,
    /// Carrier API settings
    pub carrier: CarrierConfig,
    /// WhatsApp gateway settings
    pub messaging: MessagingConfig,
    /// Warehouse pickup contact for carrier shipments
    pub sender: SenderConfig,
}

/// Carrier (Ninja Van style) API settings
#[derive(Debug, Clone)]
pub struct CarrierConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

/// Outbound WhatsApp gateway settings
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    pub gateway_url: String,
    pub device_id: String,
}

/// Warehouse pickup contact used as the shipment origin
#[derive(Debug, Clone, Default)]
pub struct SenderConfig {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub state: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/ingest.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone: std::env::var("BUSINESS_TIMEZONE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(chrono_tz::Asia::Kuala_Lumpur),
            country_code: std::env::var("COUNTRY_CODE").unwrap_or_else(|_| "60".into()),
            sale_id_prefix: std::env::var("SALE_ID_PREFIX").unwrap_or_else(|_| "MHSB".into()),
            default_platform: std::env::var("DEFAULT_PLATFORM")
                .ok()
                .and_then(|v| serde_json::from_value(serde_json::Value::String(v)).ok())
                .unwrap_or(Platform::Facebook),
            audit_buffer_size: std::env::var("AUDIT_BUFFER_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(256),
            carrier: CarrierConfig {
                base_url: std::env::var("CARRIER_BASE_URL")
                    .unwrap_or_else(|_| "https://api.ninjavan.my".into()),
                client_id: std::env::var("CARRIER_CLIENT_ID").unwrap_or_default(),
                client_secret: std::env::var("CARRIER_CLIENT_SECRET").unwrap_or_default(),
                request_timeout_ms: std::env::var("CARRIER_TIMEOUT_MS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(15_000),
            },
            messaging: MessagingConfig {
                gateway_url: std::env::var("MESSAGING_GATEWAY_URL").unwrap_or_default(),
                device_id: std::env::var("MESSAGING_DEVICE_ID").unwrap_or_default(),
            },
            sender: SenderConfig {
                name: std::env::var("SENDER_NAME").unwrap_or_default(),
                phone: std::env::var("SENDER_PHONE").unwrap_or_default(),
                address: std::env::var("SENDER_ADDRESS").unwrap_or_default(),
                postcode: std::env::var("SENDER_POSTCODE").unwrap_or_default(),
                city: std::env::var("SENDER_CITY").unwrap_or_default(),
                state: std::env::var("SENDER_STATE").unwrap_or_default(),
            },
        }
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_env();
        assert!(config.http_port > 0);
        assert!(!config.country_code.is_empty());
        assert!(!config.sale_id_prefix.is_empty());
    }
}
