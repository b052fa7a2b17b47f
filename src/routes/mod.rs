use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod interactions;
pub mod recommendations;
mod state;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/interactions", post(interactions::create))
        .route("/interactions/user/:user_id", get(interactions::list_for_user))
        .route(
            "/interactions/user/:user_id/count",
            get(interactions::count_for_user),
        )
        .route(
            "/interactions/user/:user_id/content/:content_id/latest",
            get(interactions::latest_for_pair),
        )
        .route(
            "/interactions/content/:content_id",
            get(interactions::list_for_content),
        )
        .route(
            "/recommendations/user/:user_id",
            get(recommendations::for_user),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
