//! Price tier enforcement
//!
//! Each bundle carries nine minimum prices (3 platform groups x 3
//! customer categories). An offered unit price below the applicable
//! minimum rejects the order.

use sqlx::SqlitePool;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CustomerCategory, Platform};

use crate::db::repository::bundle;

/// Look up the minimum price for a bundle/platform/category combination.
///
/// Returns `None` when the bundle name is not in the catalog; order
/// messages reference bundles by free text, so an unknown name means no
/// tier is enforced.
pub async fn minimum_price(
    pool: &SqlitePool,
    bundle_name: &str,
    platform: Platform,
    category: CustomerCategory,
) -> AppResult<Option<f64>> {
    let Some(record) = bundle::find_by_name(pool, bundle_name)
        .await
        .map_err(AppError::from)?
    else {
        return Ok(None);
    };
    Ok(Some(record.price_for(platform.group(), category)))
}

/// Reject an offered price below the applicable minimum
pub async fn ensure_minimum(
    pool: &SqlitePool,
    bundle_name: &str,
    platform: Platform,
    category: CustomerCategory,
    offered: f64,
) -> AppResult<()> {
    match minimum_price(pool, bundle_name, platform, category).await? {
        Some(minimum) if offered < minimum => Err(AppError::with_message(
            ErrorCode::PriceBelowMinimum,
            format!("Offered price {offered:.2} is below the minimum {minimum:.2}"),
        )
        .with_detail("bundle", bundle_name)
        .with_detail("minimum", minimum)
        .with_detail("offered", offered)),
        Some(_) => Ok(()),
        None => {
            tracing::warn!(bundle = bundle_name, "Unknown bundle, price tier not enforced");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::Bundle;

    async fn seed(pool: &SqlitePool) {
        bundle::create(
            pool,
            &Bundle {
                id: shared::util::snowflake_id(),
                name: "Set Combo A".into(),
                niche: "health".into(),
                ads_new: 100.0,
                ads_returning: 90.0,
                ads_existing: 80.0,
                marketplace_new: 95.0,
                marketplace_returning: 85.0,
                marketplace_existing: 75.0,
                database_new: 70.0,
                database_returning: 65.0,
                database_existing: 60.0,
                created_at: shared::util::now_millis(),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_below_minimum_rejected() {
        let db = DbService::in_memory().await.unwrap();
        seed(&db.pool).await;
        let err = ensure_minimum(
            &db.pool,
            "Set Combo A",
            Platform::Facebook,
            CustomerCategory::New,
            99.0,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::PriceBelowMinimum);
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_at_minimum_accepted() {
        let db = DbService::in_memory().await.unwrap();
        seed(&db.pool).await;
        ensure_minimum(
            &db.pool,
            "Set Combo A",
            Platform::Facebook,
            CustomerCategory::New,
            100.0,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_tier_varies_by_category() {
        let db = DbService::in_memory().await.unwrap();
        seed(&db.pool).await;
        // 85 is below the NEW tier but fine for EXISTING on ads
        ensure_minimum(
            &db.pool,
            "Set Combo A",
            Platform::Facebook,
            CustomerCategory::Existing,
            85.0,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_bundle_not_enforced() {
        let db = DbService::in_memory().await.unwrap();
        ensure_minimum(
            &db.pool,
            "Nonexistent",
            Platform::Facebook,
            CustomerCategory::New,
            1.0,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_name_lookup_case_insensitive() {
        let db = DbService::in_memory().await.unwrap();
        seed(&db.pool).await;
        let min = minimum_price(
            &db.pool,
            "set combo a",
            Platform::Shopee,
            CustomerCategory::Returning,
        )
        .await
        .unwrap();
        assert_eq!(min, Some(85.0));
    }
}
