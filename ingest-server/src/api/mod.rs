//! HTTP API
//!
//! Per-resource router modules; each exposes a `router()` merged here.

pub mod audit_log;
pub mod health;
pub mod orders;
pub mod webhook;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(webhook::router())
        .merge(orders::router())
        .merge(audit_log::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
