//! Wizard step controllers
//!
//! Controllers read the shared session and request mutations through its
//! setters. Recoverable failures never propagate: the controller records a
//! user-facing message, clears its loading flag, and reports a
//! [`StepOutcome`].
//!
//! Each network-calling controller stamps its requests from a
//! [`RequestSequence`]; a completion is only applied while it is still the
//! latest request that controller issued. Issuing a ticket and applying a
//! completion both happen under the sequence's apply guard, so no newer
//! request can start between the check and the last write.

mod preference;
mod result;
mod select;
mod upload;

pub use preference::PreferenceStep;
pub use result::{ColorOrigin, ResultStep, ResultSummary};
pub use select::SelectColorStep;
pub use upload::UploadStep;

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tonefit_common::WizardStep;

/// Shown when photo analysis fails
pub const UPLOAD_ERROR_MESSAGE: &str = "퍼스널 컬러 분석 중 오류가 발생했습니다. 다시 시도해주세요.";

/// Shown when the recommendation request fails
pub const RECOMMEND_ERROR_MESSAGE: &str =
    "화장품 추천을 불러오는 중 오류가 발생했습니다. 다시 시도해주세요.";

/// Shown when recommendations are requested before a color is known
pub const COLOR_NOT_SET_MESSAGE: &str = "퍼스널 컬러가 설정되지 않았습니다.";

/// What a controller action did to the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Request succeeded and the wizard moved to `0`
    Advanced(WizardStep),

    /// Precondition failed; no request was made
    Rejected { message: String },

    /// Request failed; the wizard is on `step`
    Failed { message: String, step: WizardStep },

    /// A newer request was issued before this one completed; nothing applied
    Superseded,
}

impl StepOutcome {
    /// User-facing message, if the action ended in an error
    pub fn error_message(&self) -> Option<&str> {
        match self {
            StepOutcome::Rejected { message } | StepOutcome::Failed { message, .. } => {
                Some(message.as_str())
            }
            StepOutcome::Advanced(_) | StepOutcome::Superseded => None,
        }
    }
}

/// Monotonic request ticket source
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
    apply: Mutex<()>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize ticket issue against state writes
    ///
    /// Hold the guard from `is_latest` through the last write of a
    /// completion. Never hold it across a network call.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.apply.lock().await
    }

    /// Issue the next ticket; it becomes the only current one
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the most recently issued
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
