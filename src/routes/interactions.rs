use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ContentId, Interaction, InteractionInput, UserId},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateInteractionRequest {
    pub user_id: UserId,
    pub content_id: ContentId,
    pub interaction_type: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct InteractionCountResponse {
    pub user_id: UserId,
    pub count: i64,
}

/// Rejects zero and negative identifiers before they reach the store
pub(crate) fn positive_id(field: &str, value: i64) -> AppResult<i64> {
    if value > 0 {
        Ok(value)
    } else {
        Err(AppError::InvalidInput(format!(
            "{} must be a positive integer, got {}",
            field, value
        )))
    }
}

/// Handler for recording an interaction
pub async fn create(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<CreateInteractionRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Interaction>)> {
    let Json(request) = payload?;

    tracing::info!(
        request_id = %request_id,
        user_id = request.user_id,
        content_id = request.content_id,
        interaction_type = %request.interaction_type,
        has_rating = request.rating.is_some(),
        "Processing interaction request"
    );

    let input = InteractionInput {
        user_id: positive_id("user_id", request.user_id)?,
        content_id: positive_id("content_id", request.content_id)?,
        interaction_type: request.interaction_type,
        rating: request.rating,
    };

    let interaction = state.interactions.create_interaction(input).await?;

    Ok((StatusCode::CREATED, Json(interaction)))
}

/// Handler listing a user's interactions, newest first
pub async fn list_for_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> AppResult<Json<Vec<Interaction>>> {
    let Path(user_id) = path?;
    let user_id = positive_id("user_id", user_id)?;

    let interactions = state.interactions.list_for_user(user_id).await?;
    Ok(Json(interactions))
}

/// Handler listing a content item's interactions, newest first
pub async fn list_for_content(
    State(state): State<AppState>,
    path: Result<Path<ContentId>, PathRejection>,
) -> AppResult<Json<Vec<Interaction>>> {
    let Path(content_id) = path?;
    let content_id = positive_id("content_id", content_id)?;

    let interactions = state.interactions.list_for_content(content_id).await?;
    Ok(Json(interactions))
}

pub async fn latest_for_pair(
    State(state): State<AppState>,
    path: Result<Path<(UserId, ContentId)>, PathRejection>,
) -> AppResult<Json<Interaction>> {
    let Path((user_id, content_id)) = path?;
    let user_id = positive_id("user_id", user_id)?;
    let content_id = positive_id("content_id", content_id)?;

    let interaction = state
        .interactions
        .latest_for_pair(user_id, content_id)
        .await?;
    Ok(Json(interaction))
}

pub async fn count_for_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> AppResult<Json<InteractionCountResponse>> {
    let Path(user_id) = path?;
    let user_id = positive_id("user_id", user_id)?;

    let count = state.interactions.count_for_user(user_id).await?;
    Ok(Json(InteractionCountResponse { user_id, count }))
}
