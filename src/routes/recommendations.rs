use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationMethod, RecommendationResult, UserId, MAX_TOP_N},
    routes::{interactions::positive_id, AppState},
};

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub top_n: Option<i64>,
    pub method: Option<String>,
}

impl RecommendationQuery {
    /// Inbound binding rules: `top_n` in 1..=50, `method` a known strategy
    ///
    /// A zero `top_n` counts as unset, like an empty method. Other
    /// out-of-range values are rejected with 400 here, whereas the service
    /// resets them to defaults.
    fn validate(self) -> AppResult<(Option<i64>, Option<String>)> {
        let top_n = match self.top_n {
            Some(0) | None => None,
            Some(n) if (1..=MAX_TOP_N).contains(&n) => Some(n),
            Some(n) => {
                return Err(AppError::InvalidInput(format!(
                    "top_n must be between 1 and {}, got {}",
                    MAX_TOP_N, n
                )));
            }
        };

        let method = match self.method {
            Some(method) if !method.is_empty() => {
                let parsed: RecommendationMethod =
                    method.parse().map_err(AppError::InvalidInput)?;
                Some(parsed.as_str().to_string())
            }
            _ => None,
        };

        Ok((top_n, method))
    }
}

/// Handler for a user's recommendations
pub async fn for_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    path: Result<Path<UserId>, PathRejection>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResult>> {
    let Path(user_id) = path?;
    let user_id = positive_id("user_id", user_id)?;
    let Query(query) = query?;
    let (top_n, method) = query.validate()?;

    tracing::info!(
        request_id = %request_id,
        user_id = user_id,
        top_n = ?top_n,
        method = ?method,
        "Processing recommendation request"
    );

    let result = state
        .recommendations
        .query(user_id, top_n, method)
        .await?;

    tracing::info!(
        request_id = %request_id,
        count = result.count,
        "Recommendations returned"
    );

    Ok(Json(result))
}
