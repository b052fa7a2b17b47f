use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use catalogue_api::{
    config::{Config, StorageBackend},
    db::{create_pool, run_migrations, InMemoryInteractionStore, InteractionStore, PgInteractionStore},
    routes::{create_router, AppState},
    services::HttpRecommendationEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let store = create_store(&config).await?;
    let engine = HttpRecommendationEngine::new(&config.engine_config())
        .context("Failed to build recommendation engine client")?;

    tracing::info!(
        recommender_url = %config.recommender_url,
        timeout_secs = config.recommender_timeout_secs,
        "Recommendation engine client configured"
    );

    let state = AppState::new(store, Arc::new(engine));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!(address = %listener.local_addr()?, "Server listening");

    // Pending notify tasks are abandoned once the runtime stops
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn create_store(config: &Config) -> anyhow::Result<Arc<dyn InteractionStore>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = create_pool(&config.database_url, config.database_max_connections)
                .await
                .context("Failed to connect to PostgreSQL")?;
            if config.run_migrations {
                run_migrations(&pool).await?;
            }
            tracing::info!("Using PostgreSQL interaction store");
            Ok(Arc::new(PgInteractionStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory interaction store; records are lost on restart");
            Ok(Arc::new(InMemoryInteractionStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
