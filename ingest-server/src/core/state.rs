use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::audit::{AuditService, AuditWorker};
use crate::carrier::{HttpCarrier, TokenCache};
use crate::core::Config;
use crate::db::DbService;
use crate::notify::HttpMessenger;
use crate::orders::OrderService;

/// Server state, a clone-cheap handle to every service
///
/// | Field | Notes |
/// |-------|-------|
/// | config | immutable settings |
/// | pool | SQLite connection pool |
/// | orders | orchestration workflow |
/// | audit | audit log service |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub orders: Arc<OrderService>,
    pub audit: Arc<AuditService>,
}

impl ServerState {
    /// Initialize all services in dependency order.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened or migrated; there is
    /// nothing useful the process can do without it.
    pub async fn initialize(config: &Config) -> Self {
        if let Some(parent) = std::path::Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).expect("Failed to create database directory");
        }

        let db = DbService::new(&config.database_path)
            .await
            .expect("Failed to initialize database");

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.carrier.request_timeout_ms))
            .build()
            .expect("Failed to build HTTP client");

        let (audit, audit_rx) = AuditService::new(db.pool.clone(), config.audit_buffer_size);
        tokio::spawn(AuditWorker::new(db.pool.clone()).run(audit_rx));

        let tokens = TokenCache::new(db.pool.clone(), http.clone(), config.carrier.clone());
        let carrier = Arc::new(HttpCarrier::new(
            http.clone(),
            tokens,
            config.carrier.clone(),
            config.sender.clone(),
            config.timezone,
        ));
        let messenger = Arc::new(HttpMessenger::new(http, config.messaging.clone()));

        let orders = Arc::new(OrderService::new(
            db.pool.clone(),
            carrier,
            messenger,
            audit.clone(),
            config,
        ));

        Self {
            config: config.clone(),
            pool: db.pool,
            orders,
            audit,
        }
    }
}
