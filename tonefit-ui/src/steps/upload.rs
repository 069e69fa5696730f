//! Upload step: photo → predicted personal color
//!
//! Selecting a photo starts two independent pieces of work:
//! - a local read of the bytes into a data-URI preview
//! - the prediction request
//!
//! Neither waits for the other and no order between them is guaranteed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tonefit_common::{color, WizardStep};
use tracing::{debug, error, info, warn};

use super::{RequestSequence, StepOutcome, UPLOAD_ERROR_MESSAGE};
use crate::client::{ColorPredictor, ImageUpload};
use crate::preview;
use crate::state::WizardSession;

/// Controller for the photo upload step
pub struct UploadStep {
    session: Arc<WizardSession>,
    predictor: Arc<dyn ColorPredictor>,
    analyzing: AtomicBool,
    error: RwLock<Option<String>>,
    sequence: Arc<RequestSequence>,
    preview_task: Mutex<Option<JoinHandle<()>>>,
}

impl UploadStep {
    pub fn new(session: Arc<WizardSession>, predictor: Arc<dyn ColorPredictor>) -> Self {
        Self {
            session,
            predictor,
            analyzing: AtomicBool::new(false),
            error: RwLock::new(None),
            sequence: Arc::new(RequestSequence::new()),
            preview_task: Mutex::new(None),
        }
    }

    /// Whether a prediction request is outstanding
    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::SeqCst)
    }

    /// Current user-facing error, if any
    pub async fn error(&self) -> Option<String> {
        self.error.read().await.clone()
    }

    /// Handle a selected photo
    ///
    /// On success the detailed color, raw class and note are stored and the
    /// wizard moves to `result`. On failure the wizard returns to `upload`
    /// with an error message. A completion overtaken by a newer upload is
    /// dropped without touching state.
    pub async fn handle_image_upload(&self, image: ImageUpload) -> StepOutcome {
        let ticket = {
            let _guard = self.sequence.lock().await;
            let ticket = self.sequence.issue();

            self.spawn_preview(&image, ticket).await;

            self.analyzing.store(true, Ordering::SeqCst);
            *self.error.write().await = None;
            self.session.set_step(WizardStep::Analyzing).await;
            ticket
        };

        info!(
            session_id = %self.session.id(),
            file = %image.file_name,
            ticket,
            "Analyzing uploaded photo"
        );

        let result = self.predictor.predict_color(&image).await;

        let _guard = self.sequence.lock().await;
        if !self.sequence.is_latest(ticket) {
            debug!(ticket, "Discarding stale prediction result");
            return StepOutcome::Superseded;
        }

        let outcome = match result {
            Ok(response) => {
                let app_color = color::to_app_format(&response.predicted_class);

                self.session
                    .set_personal_color_class(Some(response.predicted_class.clone()))
                    .await;
                self.session.set_personal_color(app_color.clone()).await;
                self.session
                    .set_personal_color_note(response.note.filter(|n| !n.is_empty()))
                    .await;
                self.session.set_step(WizardStep::Result).await;

                info!(
                    session_id = %self.session.id(),
                    personal_color = %app_color,
                    predicted_class = %response.predicted_class,
                    "Personal color predicted"
                );
                StepOutcome::Advanced(WizardStep::Result)
            }
            Err(e) => {
                error!(session_id = %self.session.id(), error = %e, "Personal color prediction failed");

                *self.error.write().await = Some(UPLOAD_ERROR_MESSAGE.to_string());
                self.session.set_step(WizardStep::Upload).await;
                StepOutcome::Failed {
                    message: UPLOAD_ERROR_MESSAGE.to_string(),
                    step: WizardStep::Upload,
                }
            }
        };

        self.analyzing.store(false, Ordering::SeqCst);
        outcome
    }

    /// Wait until the most recent preview task has finished
    pub async fn wait_for_preview(&self) {
        let handle = self.preview_task.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "Preview task failed");
            }
        }
    }

    async fn spawn_preview(&self, image: &ImageUpload, ticket: u64) {
        let session = Arc::clone(&self.session);
        let sequence = Arc::clone(&self.sequence);
        let bytes = Arc::clone(&image.bytes);
        let declared = image.content_type.clone();

        let handle = tokio::spawn(async move {
            let encoded =
                tokio::task::spawn_blocking(move || preview::data_uri(&bytes, declared.as_deref()))
                    .await;

            match encoded {
                Ok(uri) => {
                    let _guard = sequence.lock().await;
                    if sequence.is_latest(ticket) {
                        session.set_uploaded_image(Some(uri)).await;
                    } else {
                        debug!(ticket, "Discarding stale image preview");
                    }
                }
                Err(e) => warn!(error = %e, "Image preview encoding failed"),
            }
        });

        *self.preview_task.lock().await = Some(handle);
    }
}
