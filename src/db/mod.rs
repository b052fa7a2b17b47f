pub mod interactions;
pub mod postgres;

pub use interactions::{InMemoryInteractionStore, InteractionStore, PgInteractionStore, StorageError};
pub use postgres::{create_pool, run_migrations};
