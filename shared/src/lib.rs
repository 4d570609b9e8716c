//! Shared types for the order ingestion workspace
//!
//! Holds the error system, domain models, and small utilities used by
//! the ingest server. Enable the `db` feature to get sqlx row mappings
//! on the models.

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    Bundle, CarrierToken, ClosingChannel, CustomerCategory, Lead, LeadCreate, Order, OrderCreate,
    OrderStatus, OrderUpdate, PaymentMethod, Platform, PlatformGroup,
};
