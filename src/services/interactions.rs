use chrono::Utc;
use std::sync::Arc;
use tracing::Instrument;

use crate::{
    db::InteractionStore,
    error::{AppError, AppResult},
    models::{ContentId, Interaction, InteractionInput, InteractionNotice, UserId},
    services::{engine::RecommendationEngine, validation::validate_interaction},
};

/// Records interactions and forwards them to the recommendation engine
///
/// Creation runs in two stages. The commit stage (validate, persist) decides
/// the caller's outcome. The notify stage is spawned afterwards as a detached
/// task; its result is logged and never reaches the caller.
#[derive(Clone)]
pub struct InteractionService {
    store: Arc<dyn InteractionStore>,
    engine: Arc<dyn RecommendationEngine>,
}

impl InteractionService {
    pub fn new(store: Arc<dyn InteractionStore>, engine: Arc<dyn RecommendationEngine>) -> Self {
        Self { store, engine }
    }

    /// Validates, persists, then notifies the engine in the background
    ///
    /// Returns as soon as the record is stored. Validation or storage failures
    /// abort before any notification is attempted.
    pub async fn create_interaction(&self, input: InteractionInput) -> AppResult<Interaction> {
        let new_interaction = validate_interaction(input, Utc::now())?;
        let interaction = self.store.create(new_interaction).await?;

        tracing::info!(
            interaction_id = interaction.id,
            user_id = interaction.user_id,
            content_id = interaction.content_id,
            interaction_type = %interaction.interaction_type,
            "Interaction recorded"
        );

        self.spawn_notify(&interaction);

        Ok(interaction)
    }

    /// Fire-and-forget delivery of a persisted interaction
    fn spawn_notify(&self, interaction: &Interaction) {
        let engine = Arc::clone(&self.engine);
        let notice = InteractionNotice::from(interaction);
        let span = tracing::info_span!("notify_interaction", interaction_id = interaction.id);

        tokio::spawn(
            async move {
                match engine.notify(notice).await {
                    Ok(()) => tracing::debug!("Recommendation engine notified"),
                    Err(e) => tracing::warn!(
                        error = %e,
                        "Recommendation engine notification failed (non-critical)"
                    ),
                }
            }
            .instrument(span),
        );
    }

    pub async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<Interaction>> {
        Ok(self.store.list_by_user(user_id).await?)
    }

    pub async fn list_for_content(&self, content_id: ContentId) -> AppResult<Vec<Interaction>> {
        Ok(self.store.list_by_content(content_id).await?)
    }

    /// Latest interaction between a user and a content item
    pub async fn latest_for_pair(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> AppResult<Interaction> {
        self.store
            .most_recent_for_pair(user_id, content_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No interaction between user {} and content {}",
                    user_id, content_id
                ))
            })
    }

    pub async fn count_for_user(&self, user_id: UserId) -> AppResult<i64> {
        Ok(self.store.count_for_user(user_id).await?)
    }
}
