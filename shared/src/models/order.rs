//! Order Model

use serde::{Deserialize, Serialize};

use super::lead::CustomerCategory;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Returned,
}

/// Payment method (exactly two values)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CashOnDelivery,
    #[default]
    Prepaid,
}

/// Sales platform / channel of origin
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Facebook,
    Shopee,
    Tiktok,
    Database,
    Google,
}

/// Pricing group a platform belongs to (three groups, see bundle tiers)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformGroup {
    /// Paid-traffic channels (Facebook, Google)
    Ads,
    /// Marketplace channels fulfilled by the platform itself (Shopee, TikTok)
    Marketplace,
    /// Existing-contact database channel
    Database,
}

impl Platform {
    /// Pricing group this platform belongs to
    pub fn group(&self) -> PlatformGroup {
        match self {
            Platform::Facebook | Platform::Google => PlatformGroup::Ads,
            Platform::Shopee | Platform::Tiktok => PlatformGroup::Marketplace,
            Platform::Database => PlatformGroup::Database,
        }
    }

    /// Whether fulfillment is handled by the marketplace itself.
    ///
    /// Marketplace orders get no sale ID and no carrier shipment.
    pub fn is_marketplace_fulfilled(&self) -> bool {
        matches!(self.group(), PlatformGroup::Marketplace)
    }
}

/// Channel used to close the sale with the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClosingChannel {
    #[default]
    Whatsapp,
    Call,
    Live,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Human-facing order number (date + unique suffix)
    pub order_number: String,
    /// Carrier-facing daily-sequential sale ID (None for marketplace orders)
    pub sale_id: Option<String>,
    /// Marketer who owns the customer relationship
    pub marketer: String,
    pub customer_name: String,
    /// Normalized phone (country-code prefixed digits)
    pub customer_phone: String,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub state: String,
    /// Bundle / product package reference (name)
    pub bundle: String,
    pub quantity: i64,
    /// Unit price in currency unit
    pub unit_price: f64,
    pub payment_method: PaymentMethod,
    pub platform: Platform,
    /// Customer lifecycle category at order time (immutable after creation
    /// except through the explicit edit flow)
    pub category: CustomerCategory,
    pub channel: ClosingChannel,
    /// Carrier name ("" for marketplace orders)
    pub courier: String,
    /// Set only after a successful carrier call
    pub tracking_number: Option<String>,
    pub status: OrderStatus,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis, set when the order is processed for shipping
    pub processed_at: Option<i64>,
}

impl Order {
    /// Total sale amount
    pub fn total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Create order payload (manual form path and parsed text path)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub marketer: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub postcode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub bundle: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub platform: Platform,
    #[serde(default)]
    pub channel: ClosingChannel,
}

fn default_quantity() -> i64 {
    1
}

/// Update order payload (edit flow; absent fields keep their value)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub platform: Option<Platform>,
}
