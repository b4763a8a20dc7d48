use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A catalog product
///
/// Products are loaded once at startup and never mutated. Tag order is
/// preserved for display; scoring treats tags as a set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub tags: Vec<String>,
}

/// Kind of user interaction with a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    #[default]
    View,
    Purchase,
}

/// Per-user interaction history
///
/// Invariants: `viewed` holds each product id at most once, in first-view
/// order. `purchased` keeps every purchase, repeats included, and every
/// purchased id also appears in `viewed`. `categories` counts tracked
/// interaction events per category, one increment per event.
#[derive(Debug, Clone, Default)]
pub struct UserRecord {
    pub viewed: Vec<String>,
    pub purchased: Vec<String>,
    pub categories: HashMap<String, u32>,
}

impl UserRecord {
    /// Applies a single tracked interaction to the record
    pub fn track(&mut self, product: &Product, kind: InteractionKind) {
        match kind {
            InteractionKind::View => {
                if !self.viewed.contains(&product.id) {
                    self.viewed.push(product.id.clone());
                }
            }
            InteractionKind::Purchase => {
                self.purchased.push(product.id.clone());
                if !self.viewed.contains(&product.id) {
                    self.viewed.push(product.id.clone());
                }
            }
        }

        *self.categories.entry(product.category.clone()).or_insert(0) += 1;
    }

    /// True when the user has no recorded history
    pub fn is_empty(&self) -> bool {
        self.viewed.is_empty() && self.purchased.is_empty()
    }
}

/// Summary of a user's interaction history returned by the profile endpoint
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user_id: String,
    pub viewed_count: usize,
    pub purchase_count: usize,
    pub favorite_categories: HashMap<String, u32>,
    /// Names of the five most recently viewed products
    pub viewed_products: Vec<String>,
    /// Names of all purchased products, repeats included
    pub purchased_products: Vec<String>,
}

/// A ranked recommendation paired with its generated explanation
///
/// `explanation` is `None` when the upstream generation call failed; the
/// entry itself is still returned.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedProduct {
    pub product: Product,
    pub explanation: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        Product {
            id: "P001".to_string(),
            name: "Wireless Headphones".to_string(),
            category: "Electronics".to_string(),
            price: 79.99,
            tags: vec!["audio".to_string(), "wireless".to_string(), "portable".to_string()],
        }
    }

    #[test]
    fn test_interaction_kind_serde() {
        assert_eq!(
            serde_json::to_string(&InteractionKind::View).unwrap(),
            r#""view""#
        );
        assert_eq!(
            serde_json::from_str::<InteractionKind>(r#""purchase""#).unwrap(),
            InteractionKind::Purchase
        );
        assert!(serde_json::from_str::<InteractionKind>(r#""wishlist""#).is_err());
    }

    #[test]
    fn test_view_is_idempotent() {
        let mut record = UserRecord::default();
        record.track(&headphones(), InteractionKind::View);
        record.track(&headphones(), InteractionKind::View);

        assert_eq!(record.viewed, vec!["P001"]);
        assert!(record.purchased.is_empty());
        // Every event counts, even a repeated view of the same product
        assert_eq!(record.categories["Electronics"], 2);
    }

    #[test]
    fn test_purchase_implies_view() {
        let mut record = UserRecord::default();
        record.track(&headphones(), InteractionKind::Purchase);

        assert_eq!(record.viewed, vec!["P001"]);
        assert_eq!(record.purchased, vec!["P001"]);
        assert_eq!(record.categories["Electronics"], 1);
    }

    #[test]
    fn test_repeat_purchases_accumulate() {
        let mut record = UserRecord::default();
        record.track(&headphones(), InteractionKind::Purchase);
        record.track(&headphones(), InteractionKind::Purchase);

        assert_eq!(record.viewed, vec!["P001"]);
        assert_eq!(record.purchased, vec!["P001", "P001"]);
        assert_eq!(record.categories["Electronics"], 2);
    }

    #[test]
    fn test_is_empty() {
        let mut record = UserRecord::default();
        assert!(record.is_empty());
        record.track(&headphones(), InteractionKind::View);
        assert!(!record.is_empty());
    }
}
