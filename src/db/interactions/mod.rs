/// Interaction persistence
///
/// The store is the only owner of interaction records. Every operation is
/// atomic per record; nothing here spans multiple records in a transaction.
use crate::models::{ContentId, Interaction, NewInteraction, UserId};

mod memory;
mod postgres;

pub use memory::InMemoryInteractionStore;
pub use postgres::PgInteractionStore;

/// Opaque persistence failure
///
/// Callers decide whether to retry; this crate never does.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt interaction record: {0}")]
    Corrupt(String),
}

/// Durable interaction records keyed by user and content
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InteractionStore: Send + Sync {
    /// Persists a validated interaction and returns it with its assigned id
    async fn create(&self, interaction: NewInteraction) -> Result<Interaction, StorageError>;

    /// All interactions of a user, newest first
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Interaction>, StorageError>;

    /// All interactions on a content item, newest first
    async fn list_by_content(
        &self,
        content_id: ContentId,
    ) -> Result<Vec<Interaction>, StorageError>;

    /// Latest interaction between a user and a content item, if any
    async fn most_recent_for_pair(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<Option<Interaction>, StorageError>;

    async fn count_for_user(&self, user_id: UserId) -> Result<i64, StorageError>;
}
