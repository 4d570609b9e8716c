//! Customer notifications
//!
//! Sends the WhatsApp order confirmation through an external gateway.
//! Failures never affect the order itself; the orchestrator logs and
//! audits them.

use async_trait::async_trait;
use serde::Serialize;

use shared::error::{AppError, AppResult};
use shared::models::{Order, PaymentMethod};

use crate::core::config::MessagingConfig;

/// Outbound messaging seam
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a text message to a normalized phone number
    async fn send_text(&self, phone: &str, text: &str) -> AppResult<()>;
}

/// Order confirmation message body
pub fn confirmation_text(order: &Order) -> String {
    let payment = match order.payment_method {
        PaymentMethod::CashOnDelivery => "Bayar semasa terima (COD)",
        PaymentMethod::Prepaid => "Pembayaran diterima",
    };
    let tracking = match order.tracking_number.as_deref() {
        Some(t) if !t.is_empty() => format!("\nNo. tracking: {t}"),
        _ => String::new(),
    };
    format!(
        "Terima kasih {}! Pesanan anda telah disahkan.\n\nNo. pesanan: {}\nProduk: {} x{}\nJumlah: RM{:.2}\n{}{}",
        order.customer_name,
        order.order_number,
        order.bundle,
        order.quantity,
        order.total(),
        payment,
        tracking,
    )
}

#[derive(Serialize)]
struct SendRequest<'a> {
    device_id: &'a str,
    phone: &'a str,
    message: &'a str,
}

/// Production gateway client
pub struct HttpMessenger {
    http: reqwest::Client,
    config: MessagingConfig,
}

impl HttpMessenger {
    pub fn new(http: reqwest::Client, config: MessagingConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl Messenger for HttpMessenger {
    async fn send_text(&self, phone: &str, text: &str) -> AppResult<()> {
        if self.config.gateway_url.is_empty() {
            return Err(AppError::message_send("Messaging gateway not configured"));
        }

        let response = self
            .http
            .post(format!("{}/send", self.config.gateway_url))
            .json(&SendRequest {
                device_id: &self.config.device_id,
                phone,
                message: text,
            })
            .send()
            .await
            .map_err(|e| AppError::message_send(format!("Gateway request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::message_send(format!(
                "Gateway rejected message ({})",
                response.status()
            )));
        }
        Ok(())
    }
}
