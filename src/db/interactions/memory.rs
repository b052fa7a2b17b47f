use std::cmp::Reverse;

use tokio::sync::RwLock;

use super::{InteractionStore, StorageError};
use crate::models::{ContentId, Interaction, InteractionId, NewInteraction, UserId};

/// Process-local interaction store
///
/// Backs the test suites and `STORAGE_BACKEND=memory`. Records live only as
/// long as the process.
#[derive(Default)]
pub struct InMemoryInteractionStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: InteractionId,
    records: Vec<Interaction>,
}

impl InMemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored interactions across all users
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn newest_first<F>(&self, predicate: F) -> Vec<Interaction>
    where
        F: Fn(&Interaction) -> bool,
    {
        let inner = self.inner.read().await;
        let mut matching: Vec<Interaction> = inner
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect();
        matching.sort_by_key(|record| Reverse((record.created_at, record.id)));
        matching
    }
}

#[async_trait::async_trait]
impl InteractionStore for InMemoryInteractionStore {
    async fn create(&self, interaction: NewInteraction) -> Result<Interaction, StorageError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let stored = Interaction::from_new(inner.last_id, interaction);
        inner.records.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Interaction>, StorageError> {
        Ok(self.newest_first(|record| record.user_id == user_id).await)
    }

    async fn list_by_content(
        &self,
        content_id: ContentId,
    ) -> Result<Vec<Interaction>, StorageError> {
        Ok(self
            .newest_first(|record| record.content_id == content_id)
            .await)
    }

    async fn most_recent_for_pair(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<Option<Interaction>, StorageError> {
        Ok(self
            .newest_first(|record| record.user_id == user_id && record.content_id == content_id)
            .await
            .into_iter()
            .next())
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<i64, StorageError> {
        let inner = self.inner.read().await;
        let count = inner
            .records
            .iter()
            .filter(|record| record.user_id == user_id)
            .count();
        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InteractionType;
    use chrono::{Duration, Utc};

    fn new_interaction(
        user_id: UserId,
        content_id: ContentId,
        interaction_type: InteractionType,
        minutes_ago: i64,
    ) -> NewInteraction {
        NewInteraction {
            user_id,
            content_id,
            interaction_type,
            rating: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = InMemoryInteractionStore::new();
        let first = store
            .create(new_interaction(1, 2, InteractionType::View, 0))
            .await
            .unwrap();
        let second = store
            .create(new_interaction(1, 3, InteractionType::Like, 0))
            .await
            .unwrap();

        assert!(second.id > first.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_list_by_user_newest_first() {
        let store = InMemoryInteractionStore::new();
        store
            .create(new_interaction(1, 10, InteractionType::View, 30))
            .await
            .unwrap();
        store
            .create(new_interaction(1, 11, InteractionType::Share, 5))
            .await
            .unwrap();
        store
            .create(new_interaction(2, 10, InteractionType::Like, 1))
            .await
            .unwrap();

        let listed = store.list_by_user(1).await.unwrap();
        let contents: Vec<ContentId> = listed.iter().map(|i| i.content_id).collect();
        assert_eq!(contents, vec![11, 10]);
    }

    #[tokio::test]
    async fn test_list_by_content_newest_first() {
        let store = InMemoryInteractionStore::new();
        store
            .create(new_interaction(1, 10, InteractionType::View, 30))
            .await
            .unwrap();
        store
            .create(new_interaction(2, 10, InteractionType::Like, 1))
            .await
            .unwrap();
        store
            .create(new_interaction(3, 99, InteractionType::Like, 0))
            .await
            .unwrap();

        let listed = store.list_by_content(10).await.unwrap();
        let users: Vec<UserId> = listed.iter().map(|i| i.user_id).collect();
        assert_eq!(users, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_same_timestamp_orders_by_id() {
        let store = InMemoryInteractionStore::new();
        let at = Utc::now();
        for kind in [InteractionType::View, InteractionType::Comment] {
            let mut interaction = new_interaction(1, 2, kind, 0);
            interaction.created_at = at;
            store.create(interaction).await.unwrap();
        }

        let latest = store.most_recent_for_pair(1, 2).await.unwrap().unwrap();
        assert_eq!(latest.interaction_type, InteractionType::Comment);
    }

    #[tokio::test]
    async fn test_most_recent_for_pair() {
        let store = InMemoryInteractionStore::new();
        store
            .create(new_interaction(1, 2, InteractionType::Like, 10))
            .await
            .unwrap();
        store
            .create(new_interaction(1, 2, InteractionType::Dislike, 2))
            .await
            .unwrap();

        let latest = store.most_recent_for_pair(1, 2).await.unwrap().unwrap();
        assert_eq!(latest.interaction_type, InteractionType::Dislike);
        assert!(store.most_recent_for_pair(2, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_for_user() {
        let store = InMemoryInteractionStore::new();
        assert_eq!(store.count_for_user(1).await.unwrap(), 0);

        for content_id in 1..=3 {
            store
                .create(new_interaction(1, content_id, InteractionType::View, 0))
                .await
                .unwrap();
        }
        store
            .create(new_interaction(5, 1, InteractionType::View, 0))
            .await
            .unwrap();

        assert_eq!(store.count_for_user(1).await.unwrap(), 3);
        assert_eq!(store.count_for_user(5).await.unwrap(), 1);
    }
}
