pub mod engine;
pub mod interactions;
pub mod recommendations;
pub mod validation;

pub use engine::{EngineError, HttpRecommendationEngine, RecommendationEngine};
pub use interactions::InteractionService;
pub use recommendations::RecommendationService;
