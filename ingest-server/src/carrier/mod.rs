//! Carrier integration (Ninja Van style HTTP API)
//!
//! - `token`: OAuth token cache (memory + database tiers)
//! - `shipment`: the [`ShipmentGateway`] seam and its HTTP implementation
//! - `types`: wire-exact request/response bodies

pub mod shipment;
pub mod token;
pub mod types;

pub use shipment::{HttpCarrier, ShipmentGateway, build_shipment_request};
pub use token::TokenCache;
