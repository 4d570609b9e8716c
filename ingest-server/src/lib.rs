//! Order ingestion and fulfillment server
//!
//! Captures orders arriving as free-text WhatsApp messages or manual
//! form submissions, classifies the customer, enforces price tiers,
//! books the carrier shipment, and keeps a full audit trail.
//!
//! # Module layout
//!
//! ```text
//! ingest-server/src/
//! ├── core/      # config, state, server lifecycle
//! ├── api/       # HTTP routes and handlers
//! ├── audit/     # append-only audit log (mpsc worker)
//! ├── carrier/   # token cache + shipment adapter
//! ├── db/        # pool, migrations, repositories
//! ├── idgen/     # order numbers and sale IDs
//! ├── leads/     # customer classification
//! ├── notify/    # WhatsApp confirmations
//! ├── orders/    # orchestration workflow
//! ├── parser/    # free-text order command parser
//! ├── pricing/   # bundle price tiers
//! └── utils/     # phone, time, validation, logging
//! ```

pub mod api;
pub mod audit;
pub mod carrier;
pub mod core;
pub mod db;
pub mod idgen;
pub mod leads;
pub mod notify;
pub mod orders;
pub mod parser;
pub mod pricing;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Setup process environment: dotenv then logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), log_dir.as_deref());
}
