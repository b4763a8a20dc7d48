use std::collections::HashMap;

use crate::models::Product;

/// Seed catalog embedded at build time
const SEED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Static, read-only product catalog
///
/// Preserves load order: iteration order is the seed-file order, which
/// defines both the cold-start recommendation list and score tie-breaking.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from a list of products, keeping first occurrence
    /// of any duplicated id
    pub fn new(products: Vec<Product>) -> Self {
        let mut catalog = Self {
            products: Vec::with_capacity(products.len()),
            index: HashMap::with_capacity(products.len()),
        };

        for product in products {
            if !catalog.index.contains_key(&product.id) {
                catalog.index.insert(product.id.clone(), catalog.products.len());
                catalog.products.push(product);
            }
        }

        catalog
    }

    /// Parses a catalog from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Loads the embedded seed catalog
    pub fn seed() -> Self {
        Self::from_json(SEED_CATALOG).expect("embedded seed catalog is valid JSON")
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.index.get(product_id).map(|&i| &self.products[i])
    }

    /// Iterates products in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_loads() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("P001").unwrap().name, "Wireless Headphones");
        assert_eq!(catalog.get("P008").unwrap().category, "Accessories");
        assert!(catalog.get("P999").is_none());
    }

    #[test]
    fn test_iteration_preserves_seed_order() {
        let catalog = Catalog::seed();
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["P001", "P002", "P003", "P004", "P005", "P006", "P007", "P008"]
        );
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let first = Product {
            id: "P001".to_string(),
            name: "First".to_string(),
            category: "A".to_string(),
            price: 1.0,
            tags: vec![],
        };
        let duplicate = Product {
            name: "Second".to_string(),
            ..first.clone()
        };

        let catalog = Catalog::new(vec![first, duplicate]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("P001").unwrap().name, "First");
    }
}
