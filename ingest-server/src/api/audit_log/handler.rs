//! Audit log API handlers

use axum::{
    Json,
    extract::{Query, State},
};

use shared::error::{AppError, AppResult};

use crate::audit::{AuditListResponse, AuditQuery};
use crate::core::ServerState;

/// GET /api/audit?from&to&action&limit&offset
pub async fn query(
    State(state): State<ServerState>,
    Query(q): Query<AuditQuery>,
) -> AppResult<Json<AuditListResponse>> {
    let (items, total) = state.audit.query(&q).await.map_err(AppError::from)?;
    Ok(Json(AuditListResponse { items, total }))
}
