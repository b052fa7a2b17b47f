use std::sync::Arc;

use crate::{
    db::InteractionStore,
    services::{InteractionService, RecommendationEngine, RecommendationService},
};

/// Shared application state
///
/// Cheap to clone; every handler receives its own copy.
#[derive(Clone)]
pub struct AppState {
    pub interactions: InteractionService,
    pub recommendations: RecommendationService,
}

impl AppState {
    /// Wires the services around one store and one engine client
    pub fn new(store: Arc<dyn InteractionStore>, engine: Arc<dyn RecommendationEngine>) -> Self {
        Self {
            interactions: InteractionService::new(store, Arc::clone(&engine)),
            recommendations: RecommendationService::new(engine),
        }
    }
}
