use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{RecommendationParams, RecommendationResult, UserId},
    services::engine::RecommendationEngine,
};

/// Read path for ranked recommendations
///
/// Applies the `top_n` and `method` defaults, then relays the engine's
/// ranking unchanged. Engine failures are returned to the caller.
#[derive(Clone)]
pub struct RecommendationService {
    engine: Arc<dyn RecommendationEngine>,
}

impl RecommendationService {
    pub fn new(engine: Arc<dyn RecommendationEngine>) -> Self {
        Self { engine }
    }

    pub async fn query(
        &self,
        user_id: UserId,
        top_n: Option<i64>,
        method: Option<String>,
    ) -> AppResult<RecommendationResult> {
        let params = RecommendationParams::resolve(user_id, top_n, method);
        let method = params.method.clone();

        let content_ids = self.engine.fetch(params).await?;

        Ok(RecommendationResult::new(user_id, content_ids, method))
    }
}
