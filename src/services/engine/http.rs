/// HTTP client for the recommendation engine
///
/// Endpoints:
/// 1. Ranking: `POST {base}/recommendations/` → 200 with ordered `recommendations`
/// 2. Feedback: `POST {base}/recommendations/interactions` → 200 or 201
///
/// Both share one `reqwest::Client` whose timeout bounds the whole call.
use reqwest::{Client as HttpClient, StatusCode};

use super::{EngineError, RecommendationEngine};
use crate::{
    config::EngineConfig,
    models::{ContentId, EngineRecommendationResponse, InteractionNotice, RecommendationParams},
};

const RECOMMENDATIONS_PATH: &str = "/recommendations/";
const INTERACTIONS_PATH: &str = "/recommendations/interactions";

#[derive(Clone, Debug)]
pub struct HttpRecommendationEngine {
    http_client: HttpClient,
    base_url: String,
}

impl HttpRecommendationEngine {
    /// Builds the client from startup configuration
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Converts a non-success response into [`EngineError::Status`], keeping the body
    async fn status_error(response: reqwest::Response) -> EngineError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        EngineError::Status { status, body }
    }

    fn decode_recommendations(body: &str) -> Result<Vec<ContentId>, EngineError> {
        let response: EngineRecommendationResponse = serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %body,
                "Failed to deserialize recommendation engine response"
            );
            EngineError::Decode(e.to_string())
        })?;

        Ok(response
            .recommendations
            .into_iter()
            .map(|rec| rec.content_id)
            .collect())
    }
}

#[async_trait::async_trait]
impl RecommendationEngine for HttpRecommendationEngine {
    async fn fetch(&self, params: RecommendationParams) -> Result<Vec<ContentId>, EngineError> {
        let url = self.endpoint(RECOMMENDATIONS_PATH);

        let response = self.http_client.post(&url).json(&params).send().await?;

        if response.status() != StatusCode::OK {
            return Err(Self::status_error(response).await);
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw recommendation engine response");

        let content_ids = Self::decode_recommendations(&response_text)?;

        tracing::info!(
            user_id = params.user_id,
            top_n = params.top_n,
            method = %params.method,
            results = content_ids.len(),
            "Recommendations fetched"
        );

        Ok(content_ids)
    }

    async fn notify(&self, notice: InteractionNotice) -> Result<(), EngineError> {
        let url = self.endpoint(INTERACTIONS_PATH);

        let response = self.http_client.post(&url).json(&notice).send().await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            _ => Err(Self::status_error(response).await),
        }
    }
}
