//! tonefit-ui - personal color wizard
//!
//! Guides a user from a photo (or a manually picked color) to a personal
//! color result, then to cosmetic product recommendations fetched from the
//! tonefit backend.
//!
//! - [`state`]: session-scoped wizard state and its provider
//! - [`steps`]: step controllers driving transitions
//! - [`client`]: HTTP clients for the prediction and recommendation endpoints
//! - [`logging`]: reloadable log filter for the binary

pub mod client;
pub mod events;
pub mod logging;
pub mod preview;
pub mod state;
pub mod steps;

use std::sync::Arc;
use std::time::Duration;
use tonefit_common::Result;

use client::{
    build_http_client, ApiError, ColorPredictionClient, ColorPredictor, CosmeticRecommender,
    RecommendationClient,
};
use state::WizardProvider;
use steps::{PreferenceStep, ResultStep, SelectColorStep, UploadStep};

/// Application state shared by every step
#[derive(Clone)]
pub struct AppState {
    /// Owner of the active wizard session
    pub provider: Arc<WizardProvider>,
    pub predictor: Arc<dyn ColorPredictor>,
    pub recommender: Arc<dyn CosmeticRecommender>,
}

impl AppState {
    /// Create application state with the given API implementations
    pub fn new(
        predictor: Arc<dyn ColorPredictor>,
        recommender: Arc<dyn CosmeticRecommender>,
    ) -> Self {
        Self {
            provider: Arc::new(WizardProvider::new()),
            predictor,
            recommender,
        }
    }

    /// Create application state talking HTTP to `base_url`
    pub fn connect(base_url: &str, timeout: Duration) -> std::result::Result<Self, ApiError> {
        let http_client = build_http_client(timeout)?;
        Ok(Self::new(
            Arc::new(ColorPredictionClient::with_http_client(http_client.clone(), base_url)),
            Arc::new(RecommendationClient::with_http_client(http_client, base_url)),
        ))
    }

    /// Upload step bound to the active session
    pub async fn upload_step(&self) -> Result<UploadStep> {
        let session = self.provider.session().await?;
        Ok(UploadStep::new(session, Arc::clone(&self.predictor)))
    }

    /// Result step bound to the active session
    pub async fn result_step(&self) -> Result<ResultStep> {
        let session = self.provider.session().await?;
        Ok(ResultStep::new(session, Arc::clone(&self.recommender)))
    }

    /// Select-color step bound to the active session
    pub async fn select_color_step(&self) -> Result<SelectColorStep> {
        Ok(SelectColorStep::new(self.provider.session().await?))
    }

    /// Preference step bound to the active session
    pub async fn preference_step(&self) -> Result<PreferenceStep> {
        Ok(PreferenceStep::new(self.provider.session().await?))
    }
}
