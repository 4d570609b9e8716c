//! Order orchestration workflow
//!
//! Drives the whole capture pipeline: validation, classification, price
//! tiers, identifier generation, the carrier call, persistence, and the
//! best-effort side effects (customer confirmation, lead bookkeeping).
//!
//! Partial-failure policy: validation stops the flow; a carrier failure
//! degrades the order (empty tracking) but never loses it; only the
//! database write itself is fatal.

use std::sync::Arc;

use chrono_tz::Tz;
use sqlx::SqlitePool;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderCreate, OrderStatus, OrderUpdate};

use crate::audit::{AuditAction, AuditService};
use crate::carrier::ShipmentGateway;
use crate::core::Config;
use crate::db::repository::{RepoError, order as order_repo};
use crate::idgen;
use crate::leads::{self, Classification};
use crate::notify::{self, Messenger};
use crate::pricing;
use crate::utils::{phone, validation};

const CARRIER_NAME: &str = "ninjavan";

/// Result of a successful create flow
#[derive(Debug, Clone, serde::Serialize)]
pub struct CreatedOrder {
    pub order: Order,
    /// Whether a WhatsApp confirmation was dispatched to the gateway
    pub whatsapp_dispatched: bool,
}

/// Order workflow service
pub struct OrderService {
    pool: SqlitePool,
    carrier: Arc<dyn ShipmentGateway>,
    messenger: Arc<dyn Messenger>,
    audit: Arc<AuditService>,
    tz: Tz,
    country_code: String,
    sale_id_prefix: String,
    notifications_enabled: bool,
}

impl OrderService {
    pub fn new(
        pool: SqlitePool,
        carrier: Arc<dyn ShipmentGateway>,
        messenger: Arc<dyn Messenger>,
        audit: Arc<AuditService>,
        config: &Config,
    ) -> Self {
        Self {
            pool,
            carrier,
            messenger,
            audit,
            tz: config.timezone,
            country_code: config.country_code.clone(),
            sale_id_prefix: config.sale_id_prefix.clone(),
            notifications_enabled: !config.messaging.gateway_url.is_empty(),
        }
    }

    /// Create flow.
    ///
    /// Carrier failure is recorded and the order still persists with an
    /// empty tracking number for manual follow-up. Side effects run in a
    /// spawned task after the row is safely on disk.
    pub async fn create(&self, mut data: OrderCreate) -> AppResult<CreatedOrder> {
        validation::validate_order_create(&mut data, &self.country_code)?;

        let classification =
            leads::classify(&self.pool, &data.marketer, &data.customer_phone, self.tz)
                .await
                .map_err(AppError::from)?;

        pricing::ensure_minimum(
            &self.pool,
            &data.bundle,
            data.platform,
            classification.category,
            data.unit_price,
        )
        .await?;

        let mut order = self.build_order(&data, &classification).await?;

        if order.sale_id.is_some() {
            self.book_shipment(&mut order).await;
        }

        let persisted = match order_repo::create(&self.pool, &order).await {
            Ok(row) => row,
            // Sale ID collision is retryable exactly once with a fresh ID
            Err(RepoError::Duplicate(_)) if order.sale_id.is_some() => {
                let fresh = idgen::new_sale_id(&self.pool, &self.sale_id_prefix, self.tz)
                    .await
                    .map_err(AppError::from)?;
                tracing::warn!(
                    old = ?order.sale_id,
                    new = %fresh,
                    "Sale ID collision on insert, retrying with a fresh ID"
                );
                // A shipment booked under the old ID would leave sale_id
                // and tracking mismatched; cancel it and rebook
                let had_shipment = order.tracking_number.is_some();
                if let Some(old_tracking) = order.tracking_number.take() {
                    self.cancel_best_effort(&order.order_number, &old_tracking).await;
                }
                order.sale_id = Some(fresh);
                order.status = OrderStatus::Pending;
                order.processed_at = None;
                if had_shipment {
                    self.book_shipment(&mut order).await;
                }
                order_repo::create(&self.pool, &order)
                    .await
                    .map_err(AppError::from)?
            }
            Err(e) => return Err(e.into()),
        };

        self.audit
            .log_system(
                AuditAction::OrderCreated,
                serde_json::json!({
                    "order_number": persisted.order_number,
                    "sale_id": persisted.sale_id,
                    "marketer": persisted.marketer,
                    "platform": persisted.platform,
                    "category": persisted.category,
                    "total": persisted.total(),
                }),
            )
            .await;

        let whatsapp_dispatched = self.notifications_enabled;
        self.spawn_side_effects(persisted.clone(), classification);

        Ok(CreatedOrder {
            order: persisted,
            whatsapp_dispatched,
        })
    }

    /// Edit flow.
    ///
    /// When a fulfillment-relevant field changes, any outstanding shipment
    /// is cancelled (best-effort) and, unless the order now lives on a
    /// marketplace platform, a new sale ID is claimed and a new shipment
    /// issued. This also covers orders whose original shipment failed or
    /// that move from a marketplace onto a carrier platform.
    pub async fn edit(&self, order_number: &str, mut data: OrderUpdate) -> AppResult<Order> {
        let existing = self.fetch(order_number).await?;

        if existing.status == OrderStatus::Delivered {
            return Err(AppError::with_message(
                ErrorCode::OrderAlreadyShipped,
                format!("Order {order_number} is already delivered"),
            ));
        }

        if let Some(raw) = &data.customer_phone {
            let normalized = phone::normalize(raw, &self.country_code);
            if !phone::is_valid(&normalized) {
                return Err(AppError::invalid_phone(raw.clone()));
            }
            data.customer_phone = Some(normalized);
        }

        if let Some(price) = data.unit_price {
            pricing::ensure_minimum(
                &self.pool,
                &existing.bundle,
                data.platform.unwrap_or(existing.platform),
                existing.category,
                price,
            )
            .await?;
        }

        let material = needs_reshipment(&existing, &data);

        let mut updated = order_repo::update(&self.pool, existing.id, &data)
            .await
            .map_err(AppError::from)?;

        if material {
            if let Some(tracking) = existing.tracking_number.as_deref() {
                self.cancel_best_effort(&existing.order_number, tracking).await;
            }

            if updated.platform.is_marketplace_fulfilled() {
                // Moved onto a marketplace: the platform ships it now
                if existing.sale_id.is_some() || existing.tracking_number.is_some() {
                    let now = shared::util::now_millis();
                    order_repo::set_shipment(
                        &self.pool,
                        updated.id,
                        None,
                        None,
                        "",
                        OrderStatus::Pending,
                        now,
                    )
                    .await
                    .map_err(AppError::from)?;
                    updated.sale_id = None;
                    updated.tracking_number = None;
                    updated.courier = String::new();
                    updated.status = OrderStatus::Pending;
                    updated.processed_at = Some(now);
                }
            } else {
                let sale_id = idgen::new_sale_id(&self.pool, &self.sale_id_prefix, self.tz)
                    .await
                    .map_err(AppError::from)?;
                updated.sale_id = Some(sale_id.clone());
                updated.tracking_number = None;
                updated.status = OrderStatus::Pending;
                self.book_shipment(&mut updated).await;

                let now = shared::util::now_millis();
                order_repo::set_shipment(
                    &self.pool,
                    updated.id,
                    Some(&sale_id),
                    updated.tracking_number.as_deref(),
                    CARRIER_NAME,
                    updated.status,
                    now,
                )
                .await
                .map_err(AppError::from)?;
                updated.courier = CARRIER_NAME.into();
                updated.processed_at = Some(now);
            }
        }

        self.audit
            .log_system(
                AuditAction::OrderEdited,
                serde_json::json!({
                    "order_number": order_number,
                    "material_change": material,
                }),
            )
            .await;

        Ok(updated)
    }

    /// Cancel flow: cancel the outstanding shipment first, then delete
    pub async fn cancel(&self, order_number: &str) -> AppResult<()> {
        let existing = self.fetch(order_number).await?;

        if let Some(tracking) = existing.tracking_number.as_deref() {
            self.cancel_best_effort(order_number, tracking).await;
        }

        order_repo::delete(&self.pool, existing.id)
            .await
            .map_err(AppError::from)?;

        self.audit
            .log_system(
                AuditAction::OrderCancelled,
                serde_json::json!({
                    "order_number": order_number,
                    "tracking_number": existing.tracking_number,
                }),
            )
            .await;
        Ok(())
    }

    pub async fn fetch(&self, order_number: &str) -> AppResult<Order> {
        order_repo::find_by_order_number(&self.pool, order_number)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::OrderNotFound,
                    format!("Order {order_number} not found"),
                )
            })
    }

    pub async fn list(&self, limit: i64) -> AppResult<Vec<Order>> {
        order_repo::find_all(&self.pool, limit)
            .await
            .map_err(AppError::from)
    }

    async fn build_order(
        &self,
        data: &OrderCreate,
        classification: &Classification,
    ) -> AppResult<Order> {
        let marketplace = data.platform.is_marketplace_fulfilled();
        let sale_id = if marketplace {
            None
        } else {
            Some(
                idgen::new_sale_id(&self.pool, &self.sale_id_prefix, self.tz)
                    .await
                    .map_err(AppError::from)?,
            )
        };

        Ok(Order {
            id: shared::util::snowflake_id(),
            order_number: idgen::new_order_number(self.tz),
            sale_id,
            marketer: data.marketer.clone(),
            customer_name: data.customer_name.clone(),
            customer_phone: data.customer_phone.clone(),
            address: data.address.clone(),
            postcode: data.postcode.clone(),
            city: data.city.clone(),
            state: data.state.clone(),
            bundle: data.bundle.clone(),
            quantity: data.quantity,
            unit_price: data.unit_price,
            payment_method: data.payment_method,
            platform: data.platform,
            category: classification.category,
            channel: data.channel,
            courier: if marketplace { String::new() } else { CARRIER_NAME.into() },
            tracking_number: None,
            status: OrderStatus::Pending,
            created_at: shared::util::now_millis(),
            processed_at: None,
        })
    }

    /// Call the carrier and record the outcome on the in-memory order.
    ///
    /// Failure degrades: the order keeps `Pending` with no tracking and
    /// the failure is audited for manual follow-up.
    async fn book_shipment(&self, order: &mut Order) {
        match self.carrier.create_shipment(order).await {
            Ok(tracking) => {
                order.tracking_number = Some(tracking);
                order.status = OrderStatus::Shipped;
                order.processed_at = Some(shared::util::now_millis());
            }
            Err(e) => {
                tracing::warn!(
                    order_number = %order.order_number,
                    "Shipment failed, order kept for manual follow-up: {e}"
                );
                self.audit
                    .log_system(
                        AuditAction::ShipmentFailed,
                        serde_json::json!({
                            "order_number": order.order_number,
                            "sale_id": order.sale_id,
                            "error": e.to_string(),
                        }),
                    )
                    .await;
            }
        }
    }

    async fn cancel_best_effort(&self, order_number: &str, tracking: &str) {
        if let Err(e) = self.carrier.cancel_shipment(tracking).await {
            tracing::warn!(order_number, tracking, "Shipment cancel failed: {e}");
            self.audit
                .log_system(
                    AuditAction::ShipmentCancelFailed,
                    serde_json::json!({
                        "order_number": order_number,
                        "tracking_number": tracking,
                        "error": e.to_string(),
                    }),
                )
                .await;
        }
    }

    /// Post-persist side effects: WhatsApp confirmation and lead
    /// bookkeeping. Failures are logged and audited, never surfaced.
    fn spawn_side_effects(&self, order: Order, classification: Classification) {
        let messenger = self.messenger.clone();
        let audit = self.audit.clone();
        let pool = self.pool.clone();
        let tz = self.tz;
        let notifications_enabled = self.notifications_enabled;

        tokio::spawn(async move {
            if notifications_enabled {
                let text = notify::confirmation_text(&order);
                if let Err(e) = messenger.send_text(&order.customer_phone, &text).await {
                    tracing::warn!(order_number = %order.order_number, "Confirmation failed: {e}");
                    audit
                        .log_system(
                            AuditAction::NotificationFailed,
                            serde_json::json!({
                                "order_number": order.order_number,
                                "phone": order.customer_phone,
                                "error": e.to_string(),
                            }),
                        )
                        .await;
                }
            }

            if let Err(e) = leads::record_completion(
                &pool,
                &classification,
                &order.marketer,
                &order.customer_name,
                &order.customer_phone,
                &order.bundle,
                order.unit_price,
                tz,
            )
            .await
            {
                tracing::warn!(order_number = %order.order_number, "Lead update failed: {e}");
                audit
                    .log_system(
                        AuditAction::LeadUpdateFailed,
                        serde_json::json!({
                            "order_number": order.order_number,
                            "phone": order.customer_phone,
                            "error": e.to_string(),
                        }),
                    )
                    .await;
            }
        });
    }
}

/// Whether an update touches fields the carrier already acted on
fn needs_reshipment(existing: &Order, data: &OrderUpdate) -> bool {
    let address_changed = data
        .address
        .as_ref()
        .is_some_and(|a| *a != existing.address)
        || data.postcode.as_ref().is_some_and(|p| *p != existing.postcode)
        || data.city.as_ref().is_some_and(|c| *c != existing.city)
        || data.state.as_ref().is_some_and(|s| *s != existing.state);
    let price_changed = data.unit_price.is_some_and(|p| p != existing.unit_price)
        || data.quantity.is_some_and(|q| q != existing.quantity);
    let platform_changed = data.platform.is_some_and(|p| p != existing.platform);
    address_changed || price_changed || platform_changed
}
