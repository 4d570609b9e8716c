//! Inbound webhook handler
//!
//! The WhatsApp gateway forwards every message it sees as
//! `{device_id, sender, message}`, by JSON body (POST) or query string
//! (GET). When the message text names no phone, `sender` (the chat the
//! gateway saw the message in) stands in for it. Non-order chatter is
//! acknowledged with `success=false` so the gateway never retries.
//! Every call is audited in full.

use std::net::SocketAddr;
use std::time::Instant;

use axum::Json;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use serde::{Deserialize, Serialize};

use shared::models::{Order, OrderCreate};

use crate::audit::AuditAction;
use crate::core::ServerState;
use crate::parser;
use crate::utils::ErrorCategory;

/// Gateway payload, same shape for body and query
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub message: String,
}

/// Webhook response envelope
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_sent: Option<bool>,
}

impl WebhookResponse {
    fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            order: None,
            tracking_number: None,
            whatsapp_sent: None,
        }
    }
}

pub async fn incoming_post(
    State(state): State<ServerState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
    Json(payload): Json<WebhookPayload>,
) -> (StatusCode, Json<WebhookResponse>) {
    process(state, addr, method, headers, payload).await
}

pub async fn incoming_get(
    State(state): State<ServerState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
    Query(payload): Query<WebhookPayload>,
) -> (StatusCode, Json<WebhookResponse>) {
    process(state, addr, method, headers, payload).await
}

async fn process(
    state: ServerState,
    addr: SocketAddr,
    method: Method,
    headers: HeaderMap,
    payload: WebhookPayload,
) -> (StatusCode, Json<WebhookResponse>) {
    let started = Instant::now();
    let (status, response) = handle(&state, &payload).await;

    let latency_ms = started.elapsed().as_millis() as i64;
    let header_map: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .map(|(k, v)| {
            (
                k.to_string(),
                serde_json::Value::String(String::from_utf8_lossy(v.as_bytes()).into_owned()),
            )
        })
        .collect();

    state
        .audit
        .log_call(
            AuditAction::WebhookReceived,
            method.to_string(),
            "/api/webhook/incoming",
            addr.ip().to_string(),
            latency_ms,
            serde_json::json!({
                "headers": header_map,
                "payload": payload,
                "status": status.as_u16(),
                "response": serde_json::to_value(&response).unwrap_or_default(),
            }),
        )
        .await;

    (status, Json(response))
}

async fn handle(state: &ServerState, payload: &WebhookPayload) -> (StatusCode, WebhookResponse) {
    if payload.device_id.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            WebhookResponse::rejected("device_id is required"),
        );
    }
    if payload.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            WebhookResponse::rejected("message is required"),
        );
    }

    let Some(draft) = parser::parse(&payload.message) else {
        return (
            StatusCode::OK,
            WebhookResponse::rejected("Not an order command"),
        );
    };

    // A message without a phone line comes straight from the customer's
    // own chat, so the gateway sender is the customer
    let customer_phone = if draft.customer_phone.trim().is_empty() {
        payload.sender.trim().to_string()
    } else {
        draft.customer_phone
    };

    let data = OrderCreate {
        marketer: payload.device_id.trim().to_string(),
        customer_name: draft.customer_name,
        customer_phone,
        address: draft.address,
        postcode: draft.postcode,
        city: draft.city,
        state: draft.state,
        bundle: draft.product,
        quantity: draft.quantity,
        unit_price: draft.unit_price,
        payment_method: draft.payment_method,
        platform: draft.platform.unwrap_or(state.config.default_platform),
        channel: draft.channel,
    };

    match state.orders.create(data).await {
        Ok(created) => (
            StatusCode::OK,
            WebhookResponse {
                success: true,
                message: Some(format!("Order {} created", created.order.order_number)),
                error: None,
                tracking_number: created.order.tracking_number.clone(),
                whatsapp_sent: Some(created.whatsapp_dispatched),
                order: Some(created.order),
            },
        ),
        // Recognized order but bad content: the gateway must not retry
        Err(e) if e.is_validation() => (StatusCode::OK, WebhookResponse::rejected(e.message)),
        Err(e) if e.code.category() == ErrorCategory::System => (
            StatusCode::INTERNAL_SERVER_ERROR,
            WebhookResponse::rejected(e.message),
        ),
        Err(e) => (StatusCode::OK, WebhookResponse::rejected(e.message)),
    }
}
