use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{InteractionKind, Product, RecommendedProduct, UserProfile},
    services::recommendations::build_recommendations,
};

use super::AppState;

const DEFAULT_RECOMMENDATION_COUNT: usize = 3;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub product_id: String,
    #[serde(rename = "type", default)]
    pub kind: InteractionKind,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub status: &'static str,
    pub user_id: String,
    pub interaction: InteractionKind,
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub user_id: String,
    pub recommendations: Vec<RecommendedProduct>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

/// List all catalog products
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.iter().cloned().collect())
}

/// Get one product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Product>> {
    state
        .catalog
        .get(&product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))
}

/// Record a view or purchase event for a user
///
/// The body is parsed by hand so a missing or malformed field maps to a
/// 400 rather than axum's default 422.
pub async fn track_interaction(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<TrackResponse>> {
    let request: TrackRequest = serde_json::from_value(body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid track request: {}", e)))?;

    state
        .interactions
        .record(&state.catalog, &user_id, &request.product_id, request.kind)?;

    Ok(Json(TrackResponse {
        status: "success",
        user_id,
        interaction: request.kind,
        product_id: request.product_id,
    }))
}

/// Ranked recommendations with explanations
///
/// An unknown user is never an error: empty history takes the cold-start
/// ranking path.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<RecommendationsQuery>,
) -> Json<RecommendationsResponse> {
    let count = params.count.unwrap_or(DEFAULT_RECOMMENDATION_COUNT);

    let recommendations = build_recommendations(
        &state.catalog,
        &state.interactions,
        &state.explainer,
        &user_id,
        count,
    )
    .await;

    let count = recommendations.len();
    Json(RecommendationsResponse {
        user_id,
        recommendations,
        count,
    })
}

/// User interaction summary
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<UserProfile> {
    Json(state.interactions.profile(&state.catalog, &user_id))
}
