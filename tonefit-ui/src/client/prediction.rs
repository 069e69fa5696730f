//! Color-prediction client (`POST {base}/predict-color`)

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tonefit_common::api::PersonalColorResponse;
use tracing::{debug, info};

use super::{build_http_client, read_json, ApiError, ColorPredictor, ImageUpload};

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

/// Client for the personal color prediction endpoint
#[derive(Clone)]
pub struct ColorPredictionClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ColorPredictionClient {
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

    /// Submit `image` for prediction
    pub async fn predict(&self, image: &ImageUpload) -> Result<PersonalColorResponse, ApiError> {
        let url = format!("{}/predict-color", self.base_url);

        let mut part = Part::bytes(image.bytes.to_vec()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        }
        let form = Form::new().part(FILE_FIELD, part);

        debug!(url = %url, file = %image.file_name, bytes = image.bytes.len(), "Requesting color prediction");

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let prediction: PersonalColorResponse = read_json(response).await?;

        info!(
            predicted_class = %prediction.predicted_class,
            confidence = prediction.confidence,
            has_note = prediction.note.is_some(),
            "Color prediction received"
        );

        Ok(prediction)
    }
}

#[async_trait]
impl ColorPredictor for ColorPredictionClient {
    async fn predict_color(&self, image: &ImageUpload) -> Result<PersonalColorResponse, ApiError> {
        self.predict(image).await
    }
}
