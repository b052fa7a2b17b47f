mod interaction;
mod recommendation;

pub use interaction::{
    ContentId, Interaction, InteractionId, InteractionInput, InteractionType, NewInteraction,
    UnknownInteractionType, UserId,
};
pub use recommendation::{
    EngineRecommendation, EngineRecommendationResponse, InteractionNotice, RecommendationMethod,
    RecommendationParams, RecommendationResult, DEFAULT_METHOD, DEFAULT_TOP_N, MAX_TOP_N,
};
