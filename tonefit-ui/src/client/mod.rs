//! Backend API clients
//!
//! Two stateless request wrappers, one per endpoint. Neither retries,
//! caches, or deduplicates: every call is an independent request.
//!
//! Step controllers depend on the [`ColorPredictor`] and
//! [`CosmeticRecommender`] traits so tests can substitute fakes.

mod prediction;
mod recommendation;

pub use prediction::ColorPredictionClient;
pub use recommendation::RecommendationClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tonefit_common::api::{PersonalColorResponse, RecommendRequest, SearchResponse};

const USER_AGENT: &str = concat!("tonefit-ui/", env!("CARGO_PKG_VERSION"));

/// API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error (connect, timeout, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("HTTP error {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// Failed to parse the response JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Image selected for analysis
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name sent with the multipart part
    pub file_name: String,
    /// MIME type, if known
    pub content_type: Option<String>,
    /// Raw file contents
    pub bytes: Arc<[u8]>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read an image from disk, sniffing its MIME type from the contents
    pub async fn from_path(path: &Path) -> tonefit_common::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = infer::get(&bytes).map(|kind| kind.mime_type().to_string());
        Ok(Self::new(file_name, content_type, bytes))
    }
}

/// Image-based personal color prediction
#[async_trait]
pub trait ColorPredictor: Send + Sync {
    async fn predict_color(&self, image: &ImageUpload) -> Result<PersonalColorResponse, ApiError>;
}

/// Cosmetic product recommendation
#[async_trait]
pub trait CosmeticRecommender: Send + Sync {
    async fn recommend(&self, request: &RecommendRequest) -> Result<SearchResponse, ApiError>;
}

/// Build the shared HTTP client used by both API clients
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// Check the status, then decode the JSON body
///
/// Non-success statuses become [`ApiError::Http`] with the raw body text.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ApiError::Http {
            status: 422,
            body: "{\"detail\":\"bad file\"}".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 422: {\"detail\":\"bad file\"}");
    }

    #[test]
    fn test_client_creation() {
        assert!(build_http_client(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_image_from_path_sniffs_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.bin");
        let png: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        tokio::fs::write(&path, png).await.unwrap();

        let image = ImageUpload::from_path(&path).await.unwrap();
        assert_eq!(image.file_name, "face.bin");
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes.len(), png.len());
    }

    #[tokio::test]
    async fn test_image_from_missing_path() {
        let result = ImageUpload::from_path(Path::new("/nonexistent/tonefit/face.jpg")).await;
        assert!(matches!(result, Err(tonefit_common::Error::Io(_))));
    }
}
