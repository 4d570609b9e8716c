//! Bundle Repository

use super::{RepoError, RepoResult};
use shared::models::Bundle;
use sqlx::SqlitePool;

const BUNDLE_SELECT: &str = "SELECT id, name, niche, ads_new, ads_returning, ads_existing, marketplace_new, marketplace_returning, marketplace_existing, database_new, database_returning, database_existing, created_at FROM bundles";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Bundle>> {
    let sql = format!("{BUNDLE_SELECT} ORDER BY name");
    let rows = sqlx::query_as::<_, Bundle>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Case-insensitive lookup by bundle name as it appears in order messages
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Bundle>> {
    let sql = format!("{BUNDLE_SELECT} WHERE name = ? COLLATE NOCASE");
    let row = sqlx::query_as::<_, Bundle>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, bundle: &Bundle) -> RepoResult<Bundle> {
    sqlx::query(
        "INSERT INTO bundles (id, name, niche, ads_new, ads_returning, ads_existing, marketplace_new, marketplace_returning, marketplace_existing, database_new, database_returning, database_existing, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(bundle.id)
    .bind(&bundle.name)
    .bind(&bundle.niche)
    .bind(bundle.ads_new)
    .bind(bundle.ads_returning)
    .bind(bundle.ads_existing)
    .bind(bundle.marketplace_new)
    .bind(bundle.marketplace_returning)
    .bind(bundle.marketplace_existing)
    .bind(bundle.database_new)
    .bind(bundle.database_returning)
    .bind(bundle.database_existing)
    .bind(bundle.created_at)
    .execute(pool)
    .await?;
    find_by_name(pool, &bundle.name)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create bundle".into()))
}
