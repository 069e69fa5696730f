//! Recommendation client (`POST {base}/recommend?...`)
//!
//! The backend reads every parameter from the query string; the request
//! declares a JSON content type but sends no body.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tonefit_common::api::{RecommendRequest, SearchResponse};
use tracing::{debug, info};

use super::{build_http_client, read_json, ApiError, CosmeticRecommender};

/// Client for the cosmetic recommendation endpoint
#[derive(Clone)]
pub struct RecommendationClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl RecommendationClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self::with_http_client(build_http_client(timeout)?, base_url))
    }

    /// Create a client sharing an existing HTTP client
    pub fn with_http_client(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch recommendations for `request`
    pub async fn fetch(&self, request: &RecommendRequest) -> Result<SearchResponse, ApiError> {
        let url = format!("{}/recommend", self.base_url);

        debug!(
            url = %url,
            personal_color = %request.personal_color,
            limit = request.limit,
            "Requesting recommendations"
        );

        let response = self
            .http_client
            .post(&url)
            .query(&request.query_pairs())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let result: SearchResponse = read_json(response).await?;

        info!(
            personal_color = %result.personal_color,
            count = result.products.len(),
            total_found = result.total_found,
            "Recommendations received"
        );

        Ok(result)
    }
}

#[async_trait]
impl CosmeticRecommender for RecommendationClient {
    async fn recommend(&self, request: &RecommendRequest) -> Result<SearchResponse, ApiError> {
        self.fetch(request).await
    }
}
