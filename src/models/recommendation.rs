use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use super::{ContentId, InteractionType, UserId};

pub const DEFAULT_TOP_N: i64 = 10;
pub const MAX_TOP_N: i64 = 50;
pub const DEFAULT_METHOD: &str = "similarity";

/// Ranking strategies the recommendation engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationMethod {
    Similarity,
    Popularity,
}

impl RecommendationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMethod::Similarity => "similarity",
            RecommendationMethod::Popularity => "popularity",
        }
    }
}

impl Display for RecommendationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "similarity" => Ok(RecommendationMethod::Similarity),
            "popularity" => Ok(RecommendationMethod::Popularity),
            other => Err(format!(
                "unknown recommendation method '{}', expected similarity or popularity",
                other
            )),
        }
    }
}

/// Parameters of a recommendation fetch, after defaulting
///
/// Serialized as-is into the engine request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationParams {
    pub user_id: UserId,
    pub top_n: i64,
    pub method: String,
}

impl RecommendationParams {
    /// Applies the read-path defaults
    ///
    /// A `top_n` that is absent, non-positive or above [`MAX_TOP_N`] becomes
    /// [`DEFAULT_TOP_N`]; it is reset, not clamped. An absent or empty method
    /// becomes [`DEFAULT_METHOD`]; any other method is kept verbatim.
    pub fn resolve(user_id: UserId, top_n: Option<i64>, method: Option<String>) -> Self {
        let top_n = match top_n {
            Some(n) if n > 0 && n <= MAX_TOP_N => n,
            _ => DEFAULT_TOP_N,
        };
        let method = match method {
            Some(m) if !m.is_empty() => m,
            _ => DEFAULT_METHOD.to_string(),
        };

        Self {
            user_id,
            top_n,
            method,
        }
    }
}

/// Ranked recommendations returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub user_id: UserId,
    /// Engine ranking order, never re-sorted
    pub content_ids: Vec<ContentId>,
    pub method: String,
    pub count: usize,
}

impl RecommendationResult {
    pub fn new(user_id: UserId, content_ids: Vec<ContentId>, method: String) -> Self {
        let count = content_ids.len();
        Self {
            user_id,
            content_ids,
            method,
            count,
        }
    }
}

// ============================================================================
// Recommendation engine wire types
// ============================================================================

/// Response body of `POST /recommendations/` on the engine
///
/// The echoed `user_id` is ignored; engines send it as either a number or
/// a string.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineRecommendationResponse {
    pub recommendations: Vec<EngineRecommendation>,
    pub method: String,
}

/// One ranked entry in the engine response
#[derive(Debug, Clone, Deserialize)]
pub struct EngineRecommendation {
    pub content_id: ContentId,
    pub score: f64,
    #[serde(default)]
    pub title: Option<String>,
}

/// Body of `POST /recommendations/interactions` on the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionNotice {
    pub user_id: UserId,
    pub content_id: ContentId,
    pub interaction_type: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl From<&super::Interaction> for InteractionNotice {
    fn from(interaction: &super::Interaction) -> Self {
        Self {
            user_id: interaction.user_id,
            content_id: interaction.content_id,
            interaction_type: interaction.interaction_type,
            rating: interaction.rating,
        }
    }
}
