//! Lead Repository
//!
//! Leads are keyed by (marketer, phone); one marketer's contact list
//! never collides with another's.

use super::{RepoError, RepoResult};
use shared::models::{CustomerCategory, Lead, LeadCreate};
use sqlx::SqlitePool;

const LEAD_SELECT: &str = "SELECT id, marketer, name, phone, niche, category, first_contact, orders_count, closed, closed_price, created_at FROM leads";

pub async fn find_by_phone(
    pool: &SqlitePool,
    marketer: &str,
    phone: &str,
) -> RepoResult<Option<Lead>> {
    let sql = format!("{LEAD_SELECT} WHERE marketer = ? AND phone = ?");
    let row = sqlx::query_as::<_, Lead>(&sql)
        .bind(marketer)
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Lead>> {
    let sql = format!("{LEAD_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Lead>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: LeadCreate) -> RepoResult<Lead> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO leads (id, marketer, name, phone, niche, category, first_contact, orders_count, closed, closed_price, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, 0, 0, 0, ?)",
    )
    .bind(id)
    .bind(&data.marketer)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.niche)
    .bind(data.category)
    .bind(&data.first_contact)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create lead".into()))
}

/// Mark a completed purchase on the lead: promote the category, bump the
/// counter, record the closing price.
pub async fn mark_closed(
    pool: &SqlitePool,
    id: i64,
    category: CustomerCategory,
    closed_price: f64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE leads SET category = ?, orders_count = orders_count + 1, closed = 1, closed_price = ? WHERE id = ?",
    )
    .bind(category)
    .bind(closed_price)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Lead {id} not found")));
    }
    Ok(())
}
