//! Orders API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list).post(handler::create))
        .route(
            "/api/orders/{order_number}",
            get(handler::get_by_number)
                .put(handler::update)
                .delete(handler::cancel),
        )
}
