use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{InteractionStore, StorageError};
use crate::models::{ContentId, Interaction, InteractionType, NewInteraction, UserId};

const SELECT_COLUMNS: &str = "id, user_id, content_id, interaction_type, rating, created_at";

/// Row shape of the `user_interactions` table
#[derive(Debug, sqlx::FromRow)]
struct InteractionRow {
    id: i64,
    user_id: i64,
    content_id: i64,
    interaction_type: String,
    rating: Option<f64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<InteractionRow> for Interaction {
    type Error = StorageError;

    fn try_from(row: InteractionRow) -> Result<Self, Self::Error> {
        let interaction_type: InteractionType = row.interaction_type.parse().map_err(|e| {
            StorageError::Corrupt(format!("interaction {}: {}", row.id, e))
        })?;

        Ok(Interaction {
            id: row.id,
            user_id: row.user_id,
            content_id: row.content_id,
            interaction_type,
            rating: row.rating,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL-backed interaction store
#[derive(Clone)]
pub struct PgInteractionStore {
    pool: PgPool,
}

impl PgInteractionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn into_interactions(rows: Vec<InteractionRow>) -> Result<Vec<Interaction>, StorageError> {
        rows.into_iter().map(Interaction::try_from).collect()
    }
}

#[async_trait::async_trait]
impl InteractionStore for PgInteractionStore {
    async fn create(&self, interaction: NewInteraction) -> Result<Interaction, StorageError> {
        let row = sqlx::query_as::<_, InteractionRow>(&format!(
            r#"
            INSERT INTO user_interactions (user_id, content_id, interaction_type, rating, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(interaction.user_id)
        .bind(interaction.content_id)
        .bind(interaction.interaction_type.as_str())
        .bind(interaction.rating)
        .bind(interaction.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            interaction_id = row.id,
            user_id = row.user_id,
            content_id = row.content_id,
            "Interaction persisted"
        );

        Interaction::try_from(row)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Interaction>, StorageError> {
        let rows = sqlx::query_as::<_, InteractionRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM user_interactions
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Self::into_interactions(rows)
    }

    async fn list_by_content(
        &self,
        content_id: ContentId,
    ) -> Result<Vec<Interaction>, StorageError> {
        let rows = sqlx::query_as::<_, InteractionRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM user_interactions
            WHERE content_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(content_id)
        .fetch_all(&self.pool)
        .await?;

        Self::into_interactions(rows)
    }

    async fn most_recent_for_pair(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<Option<Interaction>, StorageError> {
        let row = sqlx::query_as::<_, InteractionRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM user_interactions
            WHERE user_id = $1 AND content_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Interaction::try_from).transpose()
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<i64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_interactions WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
