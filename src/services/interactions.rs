use dashmap::DashMap;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{InteractionKind, Product, UserProfile, UserRecord},
};

/// Number of recently viewed products included in profiles and
/// explanation context
pub const RECENT_VIEWS: usize = 5;

/// In-memory store of per-user interaction records
///
/// Records are created lazily on first write and kept for the process
/// lifetime. All mutation for one tracked event happens under the user's
/// map entry guard, so concurrent writes for the same user are serialized
/// while different users proceed in parallel. Reads never create records.
#[derive(Debug, Default)]
pub struct InteractionStore {
    records: DashMap<String, UserRecord>,
}

impl InteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a view or purchase event for a user
    ///
    /// Fails with `NotFound` when the product is not in the catalog; the
    /// user record is untouched in that case. Returns the tracked product.
    pub fn record(
        &self,
        catalog: &Catalog,
        user_id: &str,
        product_id: &str,
        kind: InteractionKind,
    ) -> AppResult<Product> {
        let product = catalog
            .get(product_id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;

        self.records
            .entry(user_id.to_string())
            .or_default()
            .track(product, kind);

        tracing::debug!(
            user_id = %user_id,
            product_id = %product_id,
            kind = ?kind,
            "Recorded interaction"
        );

        Ok(product.clone())
    }

    /// Returns a point-in-time copy of a user's record
    ///
    /// Unseen users get an empty default; no record is created.
    pub fn snapshot(&self, user_id: &str) -> UserRecord {
        self.records
            .get(user_id)
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Assembles the interaction summary served by the profile endpoint
    pub fn profile(&self, catalog: &Catalog, user_id: &str) -> UserProfile {
        let record = self.snapshot(user_id);

        let viewed_products = recent_view_names(catalog, &record);
        let purchased_products = record
            .purchased
            .iter()
            .filter_map(|id| catalog.get(id))
            .map(|p| p.name.clone())
            .collect();

        UserProfile {
            user_id: user_id.to_string(),
            viewed_count: record.viewed.len(),
            purchase_count: record.purchased.len(),
            favorite_categories: record.categories,
            viewed_products,
            purchased_products,
        }
    }
}

/// Names of the user's last `RECENT_VIEWS` viewed products, oldest first
pub fn recent_view_names(catalog: &Catalog, record: &UserRecord) -> Vec<String> {
    let skip = record.viewed.len().saturating_sub(RECENT_VIEWS);
    record
        .viewed
        .iter()
        .skip(skip)
        .filter_map(|id| catalog.get(id))
        .map(|p| p.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::seed()
    }

    #[test]
    fn test_record_unknown_product_is_not_found() {
        let store = InteractionStore::new();
        let result = store.record(&catalog(), "alice", "P999", InteractionKind::View);
        assert!(matches!(result, Err(AppError::NotFound(_))));
        // The failed call must not create a record
        assert!(store.snapshot("alice").is_empty());
    }

    #[test]
    fn test_record_returns_tracked_product() {
        let store = InteractionStore::new();
        let product = store
            .record(&catalog(), "alice", "P001", InteractionKind::View)
            .unwrap();
        assert_eq!(product.name, "Wireless Headphones");
    }

    #[test]
    fn test_purchase_appears_in_both_lists() {
        let catalog = catalog();
        let store = InteractionStore::new();
        store
            .record(&catalog, "alice", "P006", InteractionKind::Purchase)
            .unwrap();

        let record = store.snapshot("alice");
        assert_eq!(record.viewed, vec!["P006"]);
        assert_eq!(record.purchased, vec!["P006"]);
        assert_eq!(record.categories["Electronics"], 1);
    }

    #[test]
    fn test_snapshot_of_unseen_user_is_empty_and_non_mutating() {
        let store = InteractionStore::new();
        assert!(store.snapshot("nobody").is_empty());
        // A second snapshot still sees no stored record
        assert_eq!(store.records.len(), 0);
    }

    #[test]
    fn test_profile_untouched_user() {
        let store = InteractionStore::new();
        let profile = store.profile(&catalog(), "nobody");

        assert_eq!(profile.user_id, "nobody");
        assert_eq!(profile.viewed_count, 0);
        assert_eq!(profile.purchase_count, 0);
        assert!(profile.favorite_categories.is_empty());
        assert!(profile.viewed_products.is_empty());
        assert!(profile.purchased_products.is_empty());
    }

    #[test]
    fn test_profile_truncates_to_recent_views() {
        let catalog = catalog();
        let store = InteractionStore::new();
        for id in ["P001", "P002", "P003", "P004", "P005", "P006"] {
            store
                .record(&catalog, "alice", id, InteractionKind::View)
                .unwrap();
        }

        let profile = store.profile(&catalog, "alice");
        assert_eq!(profile.viewed_count, 6);
        assert_eq!(
            profile.viewed_products,
            vec![
                "USB-C Cable",
                "Phone Case",
                "Screen Protector",
                "Portable Charger",
                "Bluetooth Speaker"
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_writes_for_same_user_are_not_lost() {
        use std::sync::Arc;

        let catalog = Arc::new(catalog());
        let store = Arc::new(InteractionStore::new());

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let catalog = Arc::clone(&catalog);
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store
                    .record(&catalog, "alice", "P005", InteractionKind::Purchase)
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let record = store.snapshot("alice");
        assert_eq!(record.purchased.len(), 16);
        assert_eq!(record.viewed, vec!["P005"]);
        assert_eq!(record.categories["Electronics"], 16);
    }
}
