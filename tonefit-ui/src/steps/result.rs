//! Result step: personal color → cosmetic recommendations

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tonefit_common::api::RecommendRequest;
use tonefit_common::color::{self, ParsedNote};
use tonefit_common::WizardStep;
use tracing::{debug, error, info, warn};

use super::{RequestSequence, StepOutcome, COLOR_NOT_SET_MESSAGE, RECOMMEND_ERROR_MESSAGE};
use crate::client::CosmeticRecommender;
use crate::state::WizardSession;

/// How the personal color was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorOrigin {
    /// Predicted from an uploaded photo
    Analysis,
    /// Picked by the user
    Manual,
}

/// Everything the result screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub origin: ColorOrigin,
    /// Display name of the color
    pub headline: String,
    pub note: ParsedNote,
}

/// Controller for the result/recommendation step
pub struct ResultStep {
    session: Arc<WizardSession>,
    recommender: Arc<dyn CosmeticRecommender>,
    loading: AtomicBool,
    error: RwLock<Option<String>>,
    sequence: RequestSequence,
}

impl ResultStep {
    pub fn new(session: Arc<WizardSession>, recommender: Arc<dyn CosmeticRecommender>) -> Self {
        Self {
            session,
            recommender,
            loading: AtomicBool::new(false),
            error: RwLock::new(None),
            sequence: RequestSequence::new(),
        }
    }

    /// Whether a recommendation request is outstanding
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Current user-facing error, if any
    pub async fn error(&self) -> Option<String> {
        self.error.read().await.clone()
    }

    /// Headline and parsed note for the stored color
    ///
    /// A predicted class is named by its coarse tone; a manual selection by
    /// its detailed display name.
    pub async fn summary(&self) -> ResultSummary {
        let note = color::parse_note(self.session.personal_color_note().await.as_deref());

        match self.session.personal_color_class().await.filter(|c| !c.is_empty()) {
            Some(class) => ResultSummary {
                origin: ColorOrigin::Analysis,
                headline: color::coarse_class_name(&class).to_string(),
                note,
            },
            None => {
                let personal_color = self.session.personal_color().await;
                ResultSummary {
                    origin: ColorOrigin::Manual,
                    headline: self.session.personal_color_name(&personal_color).to_string(),
                    note,
                }
            }
        }
    }

    /// Fetch recommendations for the stored color and preferences
    ///
    /// The predicted class wins over the detailed color when both are set.
    /// On success the result set is replaced and the wizard moves to
    /// `cosmetics`; on failure the step is left unchanged.
    pub async fn handle_recommend(&self) -> StepOutcome {
        let personal_color = self.session.personal_color().await;
        let personal_color_class = self
            .session
            .personal_color_class()
            .await
            .filter(|c| !c.is_empty());

        if personal_color.is_empty() && personal_color_class.is_none() {
            warn!(session_id = %self.session.id(), "Recommendation requested without a personal color");
            *self.error.write().await = Some(COLOR_NOT_SET_MESSAGE.to_string());
            return StepOutcome::Rejected {
                message: COLOR_NOT_SET_MESSAGE.to_string(),
            };
        }

        let ticket = {
            let _guard = self.sequence.lock().await;
            let ticket = self.sequence.issue();
            self.loading.store(true, Ordering::SeqCst);
            *self.error.write().await = None;
            ticket
        };

        let preferences = self.session.cosmetic_preferences().await;
        let effective_color = personal_color_class.unwrap_or(personal_color);
        let request = RecommendRequest::new(&effective_color, &preferences);

        info!(
            session_id = %self.session.id(),
            personal_color = %request.personal_color,
            query = %request.query,
            ticket,
            "Requesting cosmetic recommendations"
        );

        let result = self.recommender.recommend(&request).await;

        let _guard = self.sequence.lock().await;
        if !self.sequence.is_latest(ticket) {
            debug!(ticket, "Discarding stale recommendation result");
            return StepOutcome::Superseded;
        }

        let outcome = match result {
            Ok(response) => {
                self.session.set_recommended_products(response.products).await;
                self.session.set_step(WizardStep::Cosmetics).await;
                StepOutcome::Advanced(WizardStep::Cosmetics)
            }
            Err(e) => {
                error!(session_id = %self.session.id(), error = %e, "Cosmetic recommendation failed");

                *self.error.write().await = Some(RECOMMEND_ERROR_MESSAGE.to_string());
                StepOutcome::Failed {
                    message: RECOMMEND_ERROR_MESSAGE.to_string(),
                    step: self.session.step().await,
                }
            }
        };

        self.loading.store(false, Ordering::SeqCst);
        outcome
    }
}
