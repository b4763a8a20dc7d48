use std::sync::Arc;

use shoprec_api::{
    api::{create_router, AppState},
    catalog::Catalog,
    init_tracing,
    services::explanation::{AnthropicExplainer, ExplanationGenerator},
    Config,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let catalog = Catalog::seed();
    info!(products = catalog.len(), "Catalog loaded");

    let explainer: Arc<dyn ExplanationGenerator> = Arc::new(AnthropicExplainer::new(&config)?);
    let state = AppState::new(catalog, explainer);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
