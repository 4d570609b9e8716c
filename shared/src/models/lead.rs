//! Lead Model

use serde::{Deserialize, Serialize};

/// Customer lifecycle category
///
/// Determined at order time from the customer's lead record:
/// - no lead record: `Returning` (untracked repeat customer)
/// - lead created today: `New`
/// - lead with at least one completed purchase: `Existing`
/// - any other lead: `Returning`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerCategory {
    New,
    Returning,
    Existing,
}

impl CustomerCategory {
    /// Category after a completed purchase. Every customer who has bought
    /// at least once is an existing customer from then on.
    pub fn after_purchase(&self) -> Self {
        Self::Existing
    }
}

/// Lead entity (one row per marketer + phone)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Lead {
    pub id: i64,
    /// Marketer who owns this contact
    pub marketer: String,
    pub name: String,
    /// Normalized phone (country-code prefixed digits)
    pub phone: String,
    /// Product niche the contact came in through
    pub niche: String,
    pub category: CustomerCategory,
    /// Date of first contact, business-timezone local date (YYYY-MM-DD)
    pub first_contact: String,
    /// Number of completed purchases
    pub orders_count: i64,
    /// Whether the lead has ever closed (bought)
    pub closed: bool,
    /// Price of the most recent closed sale
    pub closed_price: f64,
    /// Unix millis
    pub created_at: i64,
}

/// Create lead payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadCreate {
    pub marketer: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub niche: String,
    pub category: CustomerCategory,
    pub first_contact: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after_purchase_promotes() {
        assert_eq!(CustomerCategory::New.after_purchase(), CustomerCategory::Existing);
        assert_eq!(
            CustomerCategory::Returning.after_purchase(),
            CustomerCategory::Existing
        );
        assert_eq!(
            CustomerCategory::Existing.after_purchase(),
            CustomerCategory::Existing
        );
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&CustomerCategory::New).unwrap();
        assert_eq!(json, "\"NEW\"");
        let c: CustomerCategory = serde_json::from_str("\"RETURNING\"").unwrap();
        assert_eq!(c, CustomerCategory::Returning);
    }
}
