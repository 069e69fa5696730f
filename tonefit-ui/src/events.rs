//! Wizard events
//!
//! Every step change and result replacement is broadcast so front ends can
//! redraw. Sending with no subscribers is not an error.

use serde::{Deserialize, Serialize};
use tonefit_common::WizardStep;
use uuid::Uuid;

/// Wizard state change notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WizardEvent {
    /// Current step changed
    StepChanged {
        session_id: Uuid,
        /// Step before change
        from: WizardStep,
        /// Step after change
        to: WizardStep,
    },

    /// Personal color (detailed code) stored
    PersonalColorSet {
        session_id: Uuid,
        personal_color: String,
        /// Raw predicted class, `None` for manual selection
        personal_color_class: Option<String>,
    },

    /// Recommendation result set replaced wholesale
    ProductsReplaced { session_id: Uuid, count: usize },

    /// Uploaded image preview became available
    ImagePreviewReady { session_id: Uuid },
}
