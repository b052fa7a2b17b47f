use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Identifier of a user owned by the catalogue's user records
pub type UserId = i64;

/// Identifier of a content item owned by the catalogue's content records
pub type ContentId = i64;

/// Identifier assigned to an interaction when it is persisted
pub type InteractionId = i64;

/// Kinds of user-content interactions the catalogue records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Like,
    Dislike,
    Rating,
    Share,
    Comment,
}

impl InteractionType {
    pub const ALL: [InteractionType; 6] = [
        InteractionType::View,
        InteractionType::Like,
        InteractionType::Dislike,
        InteractionType::Rating,
        InteractionType::Share,
        InteractionType::Comment,
    ];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::View => "view",
            InteractionType::Like => "like",
            InteractionType::Dislike => "dislike",
            InteractionType::Rating => "rating",
            InteractionType::Share => "share",
            InteractionType::Comment => "comment",
        }
    }
}

impl Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the six interaction types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interaction type '{0}'")]
pub struct UnknownInteractionType(pub String);

impl FromStr for InteractionType {
    type Err = UnknownInteractionType;

    // Exact, case-sensitive match on the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InteractionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownInteractionType(s.to_string()))
    }
}

/// Raw interaction as submitted by a caller, before validation
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionInput {
    pub user_id: UserId,
    pub content_id: ContentId,
    pub interaction_type: String,
    pub rating: Option<f64>,
}

/// A validated, normalized interaction that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewInteraction {
    pub user_id: UserId,
    pub content_id: ContentId,
    pub interaction_type: InteractionType,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// A persisted interaction
///
/// Immutable once stored. `rating` is `Some` exactly when
/// `interaction_type` is [`InteractionType::Rating`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub user_id: UserId,
    pub content_id: ContentId,
    pub interaction_type: InteractionType,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    /// Attaches a store-assigned identity to a validated interaction
    pub fn from_new(id: InteractionId, new: NewInteraction) -> Self {
        Self {
            id,
            user_id: new.user_id,
            content_id: new.content_id,
            interaction_type: new.interaction_type,
            rating: new.rating,
            created_at: new.created_at,
        }
    }
}
