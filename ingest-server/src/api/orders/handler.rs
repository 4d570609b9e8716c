//! Orders API handlers
//!
//! The manual back-office path into the same orchestrator the webhook
//! uses.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::error::AppResult;
use shared::models::{Order, OrderCreate, OrderUpdate};

use crate::core::ServerState;
use crate::orders::CreatedOrder;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/orders - recent orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list(query.limit).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{order_number}
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.fetch(&order_number).await?;
    Ok(Json(order))
}

/// POST /api/orders - manual order submission
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<CreatedOrder>> {
    let created = state.orders.create(payload).await?;
    Ok(Json(created))
}

/// PUT /api/orders/{order_number} - edit flow
pub async fn update(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.edit(&order_number, payload).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/{order_number} - cancel flow
pub async fn cancel(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<bool>> {
    state.orders.cancel(&order_number).await?;
    Ok(Json(true))
}
