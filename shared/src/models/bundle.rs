//! Bundle Model
//!
//! A bundle is a sellable product package with a 3x3 price matrix:
//! one minimum price per platform group per customer category.

use serde::{Deserialize, Serialize};

use super::lead::CustomerCategory;
use super::order::PlatformGroup;

/// Bundle entity with tiered minimum prices
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Bundle {
    pub id: i64,
    /// Bundle name as it appears in order messages
    pub name: String,
    /// Product niche this bundle belongs to
    pub niche: String,
    pub ads_new: f64,
    pub ads_returning: f64,
    pub ads_existing: f64,
    pub marketplace_new: f64,
    pub marketplace_returning: f64,
    pub marketplace_existing: f64,
    pub database_new: f64,
    pub database_returning: f64,
    pub database_existing: f64,
    /// Unix millis
    pub created_at: i64,
}

impl Bundle {
    /// Minimum allowed unit price for a platform group and customer category
    pub fn price_for(&self, group: PlatformGroup, category: CustomerCategory) -> f64 {
        match (group, category) {
            (PlatformGroup::Ads, CustomerCategory::New) => self.ads_new,
            (PlatformGroup::Ads, CustomerCategory::Returning) => self.ads_returning,
            (PlatformGroup::Ads, CustomerCategory::Existing) => self.ads_existing,
            (PlatformGroup::Marketplace, CustomerCategory::New) => self.marketplace_new,
            (PlatformGroup::Marketplace, CustomerCategory::Returning) => {
                self.marketplace_returning
            }
            (PlatformGroup::Marketplace, CustomerCategory::Existing) => self.marketplace_existing,
            (PlatformGroup::Database, CustomerCategory::New) => self.database_new,
            (PlatformGroup::Database, CustomerCategory::Returning) => self.database_returning,
            (PlatformGroup::Database, CustomerCategory::Existing) => self.database_existing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bundle {
        Bundle {
            id: 1,
            name: "Set Combo A".to_string(),
            niche: "health".to_string(),
            ads_new: 100.0,
            ads_returning: 90.0,
            ads_existing: 80.0,
            marketplace_new: 95.0,
            marketplace_returning: 85.0,
            marketplace_existing: 75.0,
            database_new: 70.0,
            database_returning: 65.0,
            database_existing: 60.0,
            created_at: 0,
        }
    }

    #[test]
    fn test_price_matrix() {
        let b = sample();
        assert_eq!(b.price_for(PlatformGroup::Ads, CustomerCategory::New), 100.0);
        assert_eq!(
            b.price_for(PlatformGroup::Marketplace, CustomerCategory::Returning),
            85.0
        );
        assert_eq!(
            b.price_for(PlatformGroup::Database, CustomerCategory::Existing),
            60.0
        );
    }
}
