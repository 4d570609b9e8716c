//! Server Implementation
//!
//! HTTP server startup and shutdown

use crate::api;
use crate::audit::AuditAction;
use crate::core::{Config, ServerState};
use shared::error::{AppError, AppResult};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        state
            .audit
            .log_system(
                AuditAction::SystemStartup,
                serde_json::json!({"environment": state.config.environment}),
            )
            .await;

        let app = api::router(state.clone());
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Ingest server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        let shutdown_state = state.clone();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
            // Bypass the channel: the worker may stop before this lands
            let _ = shutdown_state
                .audit
                .log_sync(AuditAction::SystemShutdown, serde_json::json!({}))
                .await;
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        Ok(())
    }
}
