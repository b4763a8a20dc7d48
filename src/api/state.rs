use std::sync::Arc;

use crate::{
    catalog::Catalog,
    services::{explanation::ExplanationGenerator, interactions::InteractionStore},
};

/// Shared application state
///
/// The catalog is read-only for the process lifetime; the interaction
/// store handles its own per-user synchronization. The explanation
/// generator is injected so tests can substitute a stub.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub interactions: Arc<InteractionStore>,
    pub explainer: Arc<dyn ExplanationGenerator>,
}

impl AppState {
    pub fn new(catalog: Catalog, explainer: Arc<dyn ExplanationGenerator>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            interactions: Arc::new(InteractionStore::new()),
            explainer,
        }
    }
}
