//! Carrier shipment adapter
//!
//! [`ShipmentGateway`] is the seam the orchestrator talks through;
//! [`HttpCarrier`] is the production implementation against the carrier's
//! HTTP API. Tests swap in a stub.

use async_trait::async_trait;
use chrono::Duration;
use chrono_tz::Tz;

use shared::error::{AppError, AppResult};
use shared::models::{Order, PaymentMethod};

use super::token::TokenCache;
use super::types::{Address, Contact, ParcelJob, ShipmentRequest, ShipmentResponse};
use crate::core::config::{CarrierConfig, SenderConfig};
use crate::utils::time;

const COUNTRY: &str = "MY";

/// Outbound shipment operations
#[async_trait]
pub trait ShipmentGateway: Send + Sync {
    /// Create a shipment for the order, returning the tracking number
    async fn create_shipment(&self, order: &Order) -> AppResult<String>;

    /// Cancel a previously created shipment.
    ///
    /// Best-effort contract: callers log failures and move on.
    async fn cancel_shipment(&self, tracking_number: &str) -> AppResult<()>;
}

/// Build the carrier wire payload for an order.
///
/// Pickup is scheduled for today and delivery starts two days later, both
/// in the business timezone. COD amount is the order total only for
/// cash-on-delivery orders; the insured value is always the total.
pub fn build_shipment_request(
    order: &Order,
    sender: &SenderConfig,
    tz: Tz,
) -> AppResult<ShipmentRequest> {
    let sale_id = order
        .sale_id
        .as_deref()
        .ok_or_else(|| AppError::carrier_request("Order has no sale ID"))?;

    let today = time::local_today(tz);
    let pickup_date = time::format_iso(today);
    let delivery_start_date = time::format_iso(today + Duration::days(2));

    let cash_on_delivery = match order.payment_method {
        PaymentMethod::CashOnDelivery => order.total(),
        PaymentMethod::Prepaid => 0.0,
    };

    Ok(ShipmentRequest {
        requested_tracking_number: sale_id.to_string(),
        service_type: "Parcel",
        service_level: "Standard",
        from: Contact {
            name: sender.name.clone(),
            phone_number: sender.phone.clone(),
            address: Address::new(
                &sender.address,
                &sender.postcode,
                &sender.city,
                &sender.state,
                COUNTRY,
            ),
        },
        to: Contact {
            name: order.customer_name.clone(),
            phone_number: order.customer_phone.clone(),
            address: Address::new(
                &order.address,
                &order.postcode,
                &order.city,
                &order.state,
                COUNTRY,
            ),
        },
        parcel_job: ParcelJob {
            is_pickup_required: true,
            pickup_date: pickup_date.clone(),
            delivery_start_date,
            cash_on_delivery,
            insured_value: order.total(),
            delivery_instructions: format!(
                "{} x{} - {} - pickup {}",
                order.bundle, order.quantity, order.marketer, pickup_date
            ),
        },
    })
}

/// Production carrier client
pub struct HttpCarrier {
    http: reqwest::Client,
    tokens: TokenCache,
    config: CarrierConfig,
    sender: SenderConfig,
    tz: Tz,
}

impl HttpCarrier {
    pub fn new(
        http: reqwest::Client,
        tokens: TokenCache,
        config: CarrierConfig,
        sender: SenderConfig,
        tz: Tz,
    ) -> Self {
        Self {
            http,
            tokens,
            config,
            sender,
            tz,
        }
    }

    async fn post_shipment(
        &self,
        token: &str,
        payload: &ShipmentRequest,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .post(format!("{}/4.2/orders", self.config.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
    }
}

#[async_trait]
impl ShipmentGateway for HttpCarrier {
    async fn create_shipment(&self, order: &Order) -> AppResult<String> {
        let token = self.tokens.get_token().await?;
        let payload = build_shipment_request(order, &self.sender, self.tz)?;

        // One retry on transient network failure
        let response = match self.post_shipment(&token, &payload).await {
            Ok(r) => r,
            Err(e) if e.is_timeout() || e.is_connect() => {
                tracing::warn!("Carrier request failed transiently, retrying once: {e}");
                self.post_shipment(&token, &payload)
                    .await
                    .map_err(|e| AppError::carrier_request(format!("Carrier unreachable: {e}")))?
            }
            Err(e) => {
                return Err(AppError::carrier_request(format!("Carrier request failed: {e}")));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body: super::types::CarrierErrorBody =
                response.json().await.unwrap_or(super::types::CarrierErrorBody {
                    error: None,
                    message: None,
                });
            let reason = body.message().unwrap_or("no carrier message");
            return Err(
                AppError::carrier_request(format!("Shipment rejected ({status}): {reason}"))
                    .with_detail("status", status.as_u16())
                    .with_detail("sale_id", payload.requested_tracking_number.clone()),
            );
        }

        let created: ShipmentResponse = response
            .json()
            .await
            .map_err(|e| AppError::carrier_request(format!("Malformed shipment response: {e}")))?;
        Ok(created.tracking_number)
    }

    async fn cancel_shipment(&self, tracking_number: &str) -> AppResult<()> {
        let token = self.tokens.get_token().await?;
        let response = self
            .http
            .delete(format!("{}/2.2/orders/{}", self.config.base_url, tracking_number))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::carrier_cancel(format!("Cancel request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::carrier_cancel(format!(
                "Cancel rejected ({status}) for {tracking_number}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{
        ClosingChannel, CustomerCategory, OrderStatus, PaymentMethod, Platform,
    };

    const TZ: Tz = chrono_tz::Asia::Kuala_Lumpur;

    fn sender() -> SenderConfig {
        SenderConfig {
            name: "Warehouse".into(),
            phone: "60387654321".into(),
            address: "Lot 9 Jalan Industri".into(),
            postcode: "81400".into(),
            city: "Senai".into(),
            state: "Johor".into(),
        }
    }

    fn order(payment: PaymentMethod) -> Order {
        Order {
            id: 1,
            order_number: "SO-260830-AB12".into(),
            sale_id: Some("MHSB2608300001".into()),
            marketer: "aina".into(),
            customer_name: "Ali".into(),
            customer_phone: "60123456789".into(),
            address: "No 1 Jalan Besar".into(),
            postcode: "81000".into(),
            city: "Kulai".into(),
            state: "Johor".into(),
            bundle: "Set Combo A".into(),
            quantity: 2,
            unit_price: 100.0,
            payment_method: payment,
            platform: Platform::Facebook,
            category: CustomerCategory::New,
            channel: ClosingChannel::Whatsapp,
            courier: "ninjavan".into(),
            tracking_number: None,
            status: OrderStatus::Pending,
            created_at: 0,
            processed_at: None,
        }
    }

    #[test]
    fn test_tracking_number_is_sale_id() {
        let req = build_shipment_request(&order(PaymentMethod::Prepaid), &sender(), TZ).unwrap();
        assert_eq!(req.requested_tracking_number, "MHSB2608300001");
    }

    #[test]
    fn test_cod_amount_only_for_cod() {
        let cod = build_shipment_request(&order(PaymentMethod::CashOnDelivery), &sender(), TZ)
            .unwrap();
        assert_eq!(cod.parcel_job.cash_on_delivery, 200.0);
        assert_eq!(cod.parcel_job.insured_value, 200.0);

        let prepaid =
            build_shipment_request(&order(PaymentMethod::Prepaid), &sender(), TZ).unwrap();
        assert_eq!(prepaid.parcel_job.cash_on_delivery, 0.0);
        assert_eq!(prepaid.parcel_job.insured_value, 200.0);
    }

    #[test]
    fn test_delivery_starts_two_days_after_pickup() {
        let req = build_shipment_request(&order(PaymentMethod::Prepaid), &sender(), TZ).unwrap();
        let pickup = chrono::NaiveDate::parse_from_str(&req.parcel_job.pickup_date, "%Y-%m-%d")
            .unwrap();
        let delivery =
            chrono::NaiveDate::parse_from_str(&req.parcel_job.delivery_start_date, "%Y-%m-%d")
                .unwrap();
        assert_eq!(delivery - pickup, Duration::days(2));
    }

    #[test]
    fn test_instructions_carry_product_and_marketer() {
        let req = build_shipment_request(&order(PaymentMethod::Prepaid), &sender(), TZ).unwrap();
        assert!(req.parcel_job.delivery_instructions.contains("Set Combo A"));
        assert!(req.parcel_job.delivery_instructions.contains("aina"));
    }

    #[test]
    fn test_missing_sale_id_rejected() {
        let mut o = order(PaymentMethod::Prepaid);
        o.sale_id = None;
        assert!(build_shipment_request(&o, &sender(), TZ).is_err());
    }

    #[test]
    fn test_long_customer_address_split() {
        let mut o = order(PaymentMethod::Prepaid);
        o.address = "Blok C-12-3A Pangsapuri Seri Mewah Kondominium Jalan Bunga Raya Lima Taman Sejahtera Indah Mukim Senai Kulai".into();
        let req = build_shipment_request(&o, &sender(), TZ).unwrap();
        assert!(req.to.address.address1.chars().count() <= super::super::types::ADDRESS_LINE_LIMIT);
        assert!(!req.to.address.address2.is_empty());
    }
}
