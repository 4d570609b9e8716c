//! End-to-end webhook flow against the real router
//!
//! The carrier base URL points at an unroutable address, so shipment
//! attempts fail the way a carrier outage would. Orders must still
//! persist and the envelope must still report success.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use ingest_server::core::config::{CarrierConfig, Config, MessagingConfig, SenderConfig};
use ingest_server::{ServerState, api};

const MALAY_MESSAGE: &str = "#order\nnama: Ali\ntelefon: 012-345 6789\nalamat: No 1 Jalan Besar\nposkod: 81000\nbandar: Kulai\nnegeri: Johor\nproduk: Set Combo A\nkuantiti: 2\nharga: 100\nplatform: fb\nbayaran: cod";

fn test_config(db_path: &str) -> Config {
    Config {
        http_port: 0,
        database_path: db_path.to_string(),
        environment: "development".into(),
        timezone: chrono_tz::Asia::Kuala_Lumpur,
        country_code: "60".into(),
        sale_id_prefix: "MHSB".into(),
        default_platform: shared::models::Platform::Facebook,
        audit_buffer_size: 64,
        carrier: CarrierConfig {
            base_url: "http://127.0.0.1:1".into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
            request_timeout_ms: 200,
        },
        messaging: MessagingConfig {
            gateway_url: String::new(),
            device_id: String::new(),
        },
        sender: SenderConfig::default(),
    }
}

async fn state() -> (ServerState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let config = test_config(db_path.to_str().unwrap());
    let state = ServerState::initialize(&config).await;
    (state, dir)
}

fn webhook_request(body: serde_json::Value) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri("/api/webhook/incoming")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
    req
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_order_message_persists_despite_carrier_outage() {
    let (state, _dir) = state().await;
    let app = api::router(state.clone());

    let response = app
        .oneshot(webhook_request(serde_json::json!({
            "device_id": "aina",
            "sender": "60123456789",
            "message": MALAY_MESSAGE,
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["order"]["customer_name"], "Ali");
    assert_eq!(body["order"]["customer_phone"], "60123456789");
    assert_eq!(body["order"]["payment_method"], "CASH_ON_DELIVERY");
    // carrier is down: no tracking, but the order exists
    assert!(body["order"]["tracking_number"].is_null());
    assert!(
        body["order"]["sale_id"]
            .as_str()
            .unwrap()
            .starts_with("MHSB")
    );

    // visible through the orders API too
    let app = api::router(state);
    let mut req = Request::builder()
        .method("GET")
        .uri("/api/orders")
        .body(Body::empty())
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let orders = body_json(response).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sender_fills_missing_phone() {
    let (state, _dir) = state().await;
    let app = api::router(state);

    let response = app
        .oneshot(webhook_request(serde_json::json!({
            "device_id": "aina",
            "sender": "60177778888",
            "message": "#order\nnama: Ali\nalamat: No 1 Jalan Besar\nposkod: 81000\nproduk: Set Combo A",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["order"]["customer_phone"], "60177778888");
}

#[tokio::test]
async fn test_non_order_message_acknowledged() {
    let (state, _dir) = state().await;
    let app = api::router(state);

    let response = app
        .oneshot(webhook_request(serde_json::json!({
            "device_id": "aina",
            "sender": "60123456789",
            "message": "hi, nak tanya harga",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not an order command");
}

#[tokio::test]
async fn test_missing_message_is_bad_request() {
    let (state, _dir) = state().await;
    let app = api::router(state);

    let response = app
        .oneshot(webhook_request(serde_json::json!({
            "device_id": "aina",
            "sender": "60123456789",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_every_call_is_audited() {
    let (state, _dir) = state().await;
    let app = api::router(state.clone());

    let response = app
        .oneshot(webhook_request(serde_json::json!({
            "device_id": "aina",
            "sender": "60123456789",
            "message": "bukan order",
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // the audit write goes through the worker channel
    let mut found = false;
    for _ in 0..50 {
        let (entries, _) = state
            .audit
            .query(&ingest_server::audit::AuditQuery::default())
            .await
            .unwrap();
        if entries
            .iter()
            .any(|e| e.action == ingest_server::audit::AuditAction::WebhookReceived)
        {
            found = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(found, "webhook call was not audited");

    let (entries, _) = state
        .audit
        .query(&ingest_server::audit::AuditQuery::default())
        .await
        .unwrap();
    let entry = entries
        .iter()
        .find(|e| e.action == ingest_server::audit::AuditAction::WebhookReceived)
        .unwrap();
    assert_eq!(entry.method, "POST");
    assert_eq!(entry.path, "/api/webhook/incoming");
    assert_eq!(entry.caller_ip, "127.0.0.1");
    assert_eq!(entry.details["payload"]["message"], "bukan order");
}

#[tokio::test]
async fn test_get_query_variant() {
    let (state, _dir) = state().await;
    let app = api::router(state);

    let mut req = Request::builder()
        .method("GET")
        .uri("/api/webhook/incoming?device_id=aina&sender=60123456789&message=hello")
        .body(Body::empty())
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_health() {
    let (state, _dir) = state().await;
    let app = api::router(state);

    let mut req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
