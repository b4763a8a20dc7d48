use std::sync::Arc;

use chrono::Utc;

use crate::{
    catalog::Catalog,
    models::RecommendedProduct,
    services::{
        explanation::{build_context, ExplanationGenerator},
        interactions::InteractionStore,
        recommender,
    },
};

/// Ranks products for a user and attaches generated explanations
///
/// Explanation calls for the ranked products are independent, so they are
/// fanned out in parallel; results are reassembled in rank order. A failed
/// generation degrades that single entry to `explanation: None` and never
/// fails the request.
pub async fn build_recommendations(
    catalog: &Arc<Catalog>,
    store: &InteractionStore,
    explainer: &Arc<dyn ExplanationGenerator>,
    user_id: &str,
    count: usize,
) -> Vec<RecommendedProduct> {
    let record = store.snapshot(user_id);
    let ranked = recommender::recommend(catalog, &record, count);

    tracing::info!(
        user_id = %user_id,
        requested = count,
        ranked = ranked.len(),
        cold_start = record.is_empty(),
        "Ranked recommendations"
    );

    let mut tasks = Vec::with_capacity(ranked.len());
    for product_id in &ranked {
        // Ranked ids always come from the catalog
        let context = match build_context(catalog, &record, user_id, product_id) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!(product_id = %product_id, error = %e, "Skipping unresolvable recommendation");
                continue;
            }
        };

        let product = context.product.clone();
        let explainer = Arc::clone(explainer);
        let task = tokio::spawn(async move { explainer.generate(&context).await });
        tasks.push((product, task));
    }

    // Awaiting in spawn order preserves rank order in the response
    let mut recommendations = Vec::with_capacity(tasks.len());
    for (product, task) in tasks {
        let explanation = match task.await {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                tracing::warn!(
                    product_id = %product.id,
                    error = %e,
                    "Explanation generation failed, returning entry without explanation"
                );
                None
            }
            Err(e) => {
                tracing::warn!(product_id = %product.id, error = %e, "Explanation task failed to join");
                None
            }
        };

        recommendations.push(RecommendedProduct {
            product,
            explanation,
            generated_at: Utc::now(),
        });
    }

    recommendations
}
