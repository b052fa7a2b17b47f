/// Recommendation engine adapter
///
/// The engine is a separately owned service reached over HTTP. This module
/// exposes its two operations behind a trait so the orchestration code never
/// depends on the transport.
use crate::models::{ContentId, InteractionNotice, RecommendationParams};

pub mod http;

pub use http::HttpRecommendationEngine;

/// Failure talking to the recommendation engine
///
/// Returned by both operations. Fetch failures are surfaced to callers;
/// notify failures are only logged.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Connection failure, timeout, or a body that could not be read
    #[error("recommendation engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("recommendation engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed recommendation engine response: {0}")]
    Decode(String),
}

impl EngineError {
    /// Upstream HTTP status, when the engine answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            EngineError::Status { status, .. } => Some(*status),
            EngineError::Transport(e) => e.status().map(|s| s.as_u16()),
            EngineError::Decode(_) => None,
        }
    }
}

/// Operations offered by the recommendation engine
///
/// Implementations hold no mutable state; concurrent calls share nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationEngine: Send + Sync {
    /// Fetches ranked content ids for a user, in engine order
    async fn fetch(&self, params: RecommendationParams) -> Result<Vec<ContentId>, EngineError>;

    /// Tells the engine about a newly recorded interaction
    ///
    /// Advisory only: callers log the outcome and move on.
    async fn notify(&self, notice: InteractionNotice) -> Result<(), EngineError>;
}
