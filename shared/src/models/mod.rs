//! Domain models shared across the workspace
//!
//! With the `db` feature enabled, entities derive `sqlx::FromRow` and
//! enums derive `sqlx::Type` so repositories can map rows directly.

pub mod bundle;
pub mod carrier_token;
pub mod lead;
pub mod order;

pub use bundle::Bundle;
pub use carrier_token::CarrierToken;
pub use lead::{CustomerCategory, Lead, LeadCreate};
pub use order::{
    ClosingChannel, Order, OrderCreate, OrderStatus, OrderUpdate, PaymentMethod, Platform,
    PlatformGroup,
};
