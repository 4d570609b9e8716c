//! Lead classification engine
//!
//! Decides which lifecycle category a customer falls into at order time,
//! and performs the bookkeeping after a completed purchase. Classification
//! itself is read-only and idempotent; all mutation happens in
//! [`record_completion`].

use chrono_tz::Tz;
use sqlx::SqlitePool;

use shared::models::{CustomerCategory, Lead, LeadCreate};

use crate::db::repository::{RepoResult, lead};
use crate::utils::time;

/// Outcome of classifying a customer
#[derive(Debug, Clone)]
pub struct Classification {
    pub category: CustomerCategory,
    /// The matched lead, if one exists
    pub lead: Option<Lead>,
}

/// Classify a customer by their lead record.
///
/// Rules, in order:
/// 1. no lead for (marketer, phone): `Returning`, an untracked repeat
///    customer, a lead will be backdated on completion
/// 2. lead already `Existing` or with a completed purchase: `Existing`
/// 3. first contact today: `New`
/// 4. otherwise: `Returning`
pub async fn classify(
    pool: &SqlitePool,
    marketer: &str,
    phone: &str,
    tz: Tz,
) -> RepoResult<Classification> {
    let Some(record) = lead::find_by_phone(pool, marketer, phone).await? else {
        return Ok(Classification {
            category: CustomerCategory::Returning,
            lead: None,
        });
    };

    let category = if record.category == CustomerCategory::Existing || record.closed {
        CustomerCategory::Existing
    } else if record.first_contact == time::format_iso(time::local_today(tz)) {
        CustomerCategory::New
    } else {
        CustomerCategory::Returning
    };

    Ok(Classification {
        category,
        lead: Some(record),
    })
}

/// Record a completed purchase against the lead book.
///
/// Promotes the lead to `Existing`, bumps the purchase counter, and stores
/// the closing price. A customer without a lead gets one created with the
/// first contact backdated to yesterday, so they never misclassify as
/// `New` on their next order.
pub async fn record_completion(
    pool: &SqlitePool,
    classification: &Classification,
    marketer: &str,
    name: &str,
    phone: &str,
    niche: &str,
    closed_price: f64,
    tz: Tz,
) -> RepoResult<()> {
    let record = match &classification.lead {
        Some(existing) => existing.clone(),
        None => {
            let yesterday = time::format_iso(time::local_yesterday(tz));
            lead::create(
                pool,
                LeadCreate {
                    marketer: marketer.to_string(),
                    name: name.to_string(),
                    phone: phone.to_string(),
                    niche: niche.to_string(),
                    category: CustomerCategory::Returning,
                    first_contact: yesterday,
                },
            )
            .await?
        }
    };

    lead::mark_closed(
        pool,
        record.id,
        record.category.after_purchase(),
        closed_price,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    const TZ: Tz = chrono_tz::Asia::Kuala_Lumpur;

    async fn seed_lead(pool: &SqlitePool, first_contact: &str) -> Lead {
        lead::create(
            pool,
            LeadCreate {
                marketer: "aina".into(),
                name: "Ali".into(),
                phone: "60123456789".into(),
                niche: "health".into(),
                category: CustomerCategory::New,
                first_contact: first_contact.into(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_no_lead_is_returning() {
        let db = DbService::in_memory().await.unwrap();
        let c = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        assert_eq!(c.category, CustomerCategory::Returning);
        assert!(c.lead.is_none());
    }

    #[tokio::test]
    async fn test_lead_contacted_today_is_new() {
        let db = DbService::in_memory().await.unwrap();
        let today = time::format_iso(time::local_today(TZ));
        seed_lead(&db.pool, &today).await;
        let c = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        assert_eq!(c.category, CustomerCategory::New);
    }

    #[tokio::test]
    async fn test_older_lead_is_returning() {
        let db = DbService::in_memory().await.unwrap();
        seed_lead(&db.pool, "2024-01-15").await;
        let c = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        assert_eq!(c.category, CustomerCategory::Returning);
    }

    #[tokio::test]
    async fn test_closed_lead_is_existing() {
        let db = DbService::in_memory().await.unwrap();
        let today = time::format_iso(time::local_today(TZ));
        let record = seed_lead(&db.pool, &today).await;
        lead::mark_closed(&db.pool, record.id, CustomerCategory::Existing, 100.0)
            .await
            .unwrap();
        let c = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        assert_eq!(c.category, CustomerCategory::Existing);
    }

    #[tokio::test]
    async fn test_classify_idempotent() {
        let db = DbService::in_memory().await.unwrap();
        let today = time::format_iso(time::local_today(TZ));
        seed_lead(&db.pool, &today).await;
        let a = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        let b = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        assert_eq!(a.category, b.category);
    }

    #[tokio::test]
    async fn test_marketer_scoping() {
        let db = DbService::in_memory().await.unwrap();
        let today = time::format_iso(time::local_today(TZ));
        seed_lead(&db.pool, &today).await;
        // same phone, different marketer: no lead
        let c = classify(&db.pool, "zul", "60123456789", TZ).await.unwrap();
        assert_eq!(c.category, CustomerCategory::Returning);
        assert!(c.lead.is_none());
    }

    #[tokio::test]
    async fn test_completion_backdates_missing_lead() {
        let db = DbService::in_memory().await.unwrap();
        let c = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        record_completion(&db.pool, &c, "aina", "Ali", "60123456789", "health", 150.0, TZ)
            .await
            .unwrap();

        let record = lead::find_by_phone(&db.pool, "aina", "60123456789")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.first_contact, time::format_iso(time::local_yesterday(TZ)));
        assert_eq!(record.category, CustomerCategory::Existing);
        assert_eq!(record.orders_count, 1);
        assert!(record.closed);
        assert_eq!(record.closed_price, 150.0);
    }

    #[tokio::test]
    async fn test_new_becomes_existing_after_purchase() {
        let db = DbService::in_memory().await.unwrap();
        let today = time::format_iso(time::local_today(TZ));
        seed_lead(&db.pool, &today).await;

        let first = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        assert_eq!(first.category, CustomerCategory::New);
        record_completion(&db.pool, &first, "aina", "Ali", "60123456789", "health", 100.0, TZ)
            .await
            .unwrap();

        let second = classify(&db.pool, "aina", "60123456789", TZ).await.unwrap();
        assert_eq!(second.category, CustomerCategory::Existing);
    }
}
