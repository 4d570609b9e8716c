//! Inbound webhook module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/webhook/incoming",
        get(handler::incoming_get).post(handler::incoming_post),
    )
}
