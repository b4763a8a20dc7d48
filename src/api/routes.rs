use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::{handlers, AppState};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        // Catalog
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/:product_id", get(handlers::get_product))
        // User interactions
        .route("/api/user/:user_id/track", post(handlers::track_interaction))
        .route("/api/user/:user_id/profile", get(handlers::get_profile))
        // Recommendations
        .route(
            "/api/recommendations/:user_id",
            get(handlers::get_recommendations),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        // Outermost, so the trace span can pick up the request id
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
