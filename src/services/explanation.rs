use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    config::Config,
    error::{AppError, AppResult},
    models::UserRecord,
    services::interactions::recent_view_names,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 200;

/// Everything the text generator needs to explain one recommendation
#[derive(Debug, Clone)]
pub struct ExplanationContext {
    pub user_id: String,
    /// Names of the user's most recently viewed products
    pub recent_views: Vec<String>,
    /// Names of all purchased products
    pub purchases: Vec<String>,
    pub favorite_categories: HashMap<String, u32>,
    pub product: crate::models::Product,
}

/// Builds the explanation context for one recommended product
///
/// Fails with `NotFound` for a product id outside the catalog. The context
/// is assembled from an already-taken record snapshot, so no store lock is
/// held while the downstream call is in flight.
pub fn build_context(
    catalog: &Catalog,
    record: &UserRecord,
    user_id: &str,
    product_id: &str,
) -> AppResult<ExplanationContext> {
    let product = catalog
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;

    let purchases = record
        .purchased
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|p| p.name.clone())
        .collect();

    Ok(ExplanationContext {
        user_id: user_id.to_string(),
        recent_views: recent_view_names(catalog, record),
        purchases,
        favorite_categories: record.categories.clone(),
        product: product.clone(),
    })
}

/// Generates a natural-language explanation for a recommendation
///
/// The single seam to the external text-generation service; mocked in
/// unit tests and stubbed in integration tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExplanationGenerator: Send + Sync {
    async fn generate(&self, context: &ExplanationContext) -> AppResult<String>;
}

/// Explanation generator backed by the Anthropic Messages API
#[derive(Clone)]
pub struct AnthropicExplainer {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl AnthropicExplainer {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.explanation_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.anthropic_api_key.clone(),
            api_url: config.anthropic_api_url.clone(),
            model: config.anthropic_model.clone(),
        })
    }

    /// Renders the user-profile prompt sent to the model
    fn build_prompt(context: &ExplanationContext) -> String {
        let mut categories: Vec<(&str, u32)> = context
            .favorite_categories
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        categories.sort();
        let categories = categories
            .iter()
            .map(|(name, count)| format!("{}: {}", name, count))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Based on the user profile and recommended product details, \
             explain why this recommendation makes sense:\n\
             \n\
             User Profile:\n\
             - Viewed products: {}\n\
             - Purchased products: {}\n\
             - Favorite categories: {{{}}}\n\
             \n\
             Recommended Product:\n\
             - Name: {}\n\
             - Category: {}\n\
             - Price: ${}\n\
             - Tags: {}\n\
             \n\
             Please provide a concise, personalized explanation (2-3 sentences) \
             for why this product would be a good recommendation for this user \
             based on their behavior and preferences.",
            context.recent_views.join(", "),
            context.purchases.join(", "),
            categories,
            context.product.name,
            context.product.category,
            context.product.price,
            context.product.tags.join(", "),
        )
    }
}

#[async_trait]
impl ExplanationGenerator for AnthropicExplainer {
    async fn generate(&self, context: &ExplanationContext) -> AppResult<String> {
        let url = format!("{}/v1/messages", self.api_url);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: Self::build_prompt(context),
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Anthropic API returned status {}: {}",
                status, body
            )));
        }

        let messages: MessagesResponse = response.json().await?;
        let text = messages
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| {
                AppError::ExternalApi("Anthropic response contained no text".to_string())
            })?;

        tracing::debug!(
            user_id = %context.user_id,
            product_id = %context.product.id,
            "Explanation generated"
        );

        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}
