//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderStatus, OrderUpdate};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, order_number, sale_id, marketer, customer_name, customer_phone, address, postcode, city, state, bundle, quantity, unit_price, payment_method, platform, category, channel, courier, tracking_number, status, created_at, processed_at FROM orders";

pub async fn find_all(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} ORDER BY created_at DESC LIMIT ?");
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_order_number(pool: &SqlitePool, number: &str) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE order_number = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a fully-built order row
pub async fn create(pool: &SqlitePool, order: &Order) -> RepoResult<Order> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, sale_id, marketer, customer_name, customer_phone, address, postcode, city, state, bundle, quantity, unit_price, payment_method, platform, category, channel, courier, tracking_number, status, created_at, processed_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(&order.sale_id)
    .bind(&order.marketer)
    .bind(&order.customer_name)
    .bind(&order.customer_phone)
    .bind(&order.address)
    .bind(&order.postcode)
    .bind(&order.city)
    .bind(&order.state)
    .bind(&order.bundle)
    .bind(order.quantity)
    .bind(order.unit_price)
    .bind(order.payment_method)
    .bind(order.platform)
    .bind(order.category)
    .bind(order.channel)
    .bind(&order.courier)
    .bind(&order.tracking_number)
    .bind(order.status)
    .bind(order.created_at)
    .bind(order.processed_at)
    .execute(pool)
    .await?;

    find_by_id(pool, order.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Patch mutable order fields, keeping absent ones
pub async fn update(pool: &SqlitePool, id: i64, data: &OrderUpdate) -> RepoResult<Order> {
    let rows = sqlx::query(
        "UPDATE orders SET customer_name = COALESCE(?, customer_name), customer_phone = COALESCE(?, customer_phone), address = COALESCE(?, address), postcode = COALESCE(?, postcode), city = COALESCE(?, city), state = COALESCE(?, state), quantity = COALESCE(?, quantity), unit_price = COALESCE(?, unit_price), payment_method = COALESCE(?, payment_method), platform = COALESCE(?, platform) WHERE id = ?",
    )
    .bind(&data.customer_name)
    .bind(&data.customer_phone)
    .bind(&data.address)
    .bind(&data.postcode)
    .bind(&data.city)
    .bind(&data.state)
    .bind(data.quantity)
    .bind(data.unit_price)
    .bind(data.payment_method)
    .bind(data.platform)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

/// Record the outcome of a carrier call for an existing order
#[allow(clippy::too_many_arguments)]
pub async fn set_shipment(
    pool: &SqlitePool,
    id: i64,
    sale_id: Option<&str>,
    tracking_number: Option<&str>,
    courier: &str,
    status: OrderStatus,
    processed_at: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE orders SET sale_id = ?, tracking_number = ?, courier = ?, status = ?, processed_at = ? WHERE id = ?",
    )
    .bind(sale_id)
    .bind(tracking_number)
    .bind(courier)
    .bind(status)
    .bind(processed_at)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
