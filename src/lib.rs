pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;

/// Initializes the global tracing subscriber
///
/// Honors `RUST_LOG`; defaults to `info` for this crate and tower-http.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shoprec_api=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
