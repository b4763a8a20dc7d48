use std::collections::{HashMap, HashSet};

use crate::{catalog::Catalog, models::UserRecord, services::similarity::jaccard};

const VIEW_WEIGHT: f64 = 1.0;
const PURCHASE_WEIGHT: f64 = 2.0;
const CATEGORY_BONUS: f64 = 1.5;

/// Ranks catalog products for a user
///
/// Returns at most `count` product ids, never including anything the user
/// has already viewed or purchased. Users with no history get the first
/// `count` products in catalog order. Ties keep catalog order.
pub fn recommend(catalog: &Catalog, record: &UserRecord, count: usize) -> Vec<String> {
    if record.is_empty() {
        return cold_start(catalog, count);
    }

    let seen: HashSet<&str> = record
        .viewed
        .iter()
        .chain(record.purchased.iter())
        .map(String::as_str)
        .collect();

    let preference_tags = preference_tag_weights(catalog, record, &seen);
    if preference_tags.is_empty() {
        // History references nothing in the catalog
        return cold_start(catalog, count);
    }

    let mut scored: Vec<(&str, f64)> = catalog
        .iter()
        .filter(|p| !seen.contains(p.id.as_str()))
        .map(|p| (p.id.as_str(), score(catalog, record, &preference_tags, p.id.as_str())))
        .collect();

    // Stable sort: equal scores stay in catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(count)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Fixed fallback for users with no usable history
fn cold_start(catalog: &Catalog, count: usize) -> Vec<String> {
    catalog.iter().take(count).map(|p| p.id.clone()).collect()
}

/// Accumulates per-tag weights over the user's seen products
///
/// A purchased product contributes `PURCHASE_WEIGHT` per tag, a merely
/// viewed one `VIEW_WEIGHT`, once per product. Scoring reads only the key
/// set of this map; the accumulated magnitudes do not affect rank.
fn preference_tag_weights<'a>(
    catalog: &'a Catalog,
    record: &UserRecord,
    seen: &HashSet<&str>,
) -> HashMap<&'a str, f64> {
    let purchased: HashSet<&str> = record.purchased.iter().map(String::as_str).collect();

    let mut weights: HashMap<&str, f64> = HashMap::new();
    for product in seen.iter().filter_map(|id| catalog.get(id)) {
        let weight = if purchased.contains(product.id.as_str()) {
            PURCHASE_WEIGHT
        } else {
            VIEW_WEIGHT
        };
        for tag in &product.tags {
            *weights.entry(tag.as_str()).or_insert(0.0) += weight;
        }
    }

    weights
}

/// Score of one candidate product: tag similarity against the user's
/// preference tags, multiplied by the category bonus when the user has
/// interacted with the product's category before
fn score(
    catalog: &Catalog,
    record: &UserRecord,
    preference_tags: &HashMap<&str, f64>,
    product_id: &str,
) -> f64 {
    let Some(product) = catalog.get(product_id) else {
        return 0.0;
    };

    let similarity = jaccard(
        product.tags.iter().map(String::as_str),
        preference_tags.keys().copied(),
    );

    let category_bonus = if record.categories.get(&product.category).copied().unwrap_or(0) > 0 {
        CATEGORY_BONUS
    } else {
        1.0
    };

    similarity * category_bonus
}
