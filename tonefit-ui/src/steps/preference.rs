//! Cosmetic and style preference input

use std::sync::Arc;
use tracing::debug;

use crate::state::{StylePreferences, WizardSession};

/// Controller for the preference steps
pub struct PreferenceStep {
    session: Arc<WizardSession>,
}

impl PreferenceStep {
    pub fn new(session: Arc<WizardSession>) -> Self {
        Self { session }
    }

    /// Store the cosmetic preference text, trimmed
    ///
    /// Blank input stores the empty string ("no preference").
    pub async fn submit_cosmetic(&self, text: &str) {
        let preferences = text.trim();
        debug!(session_id = %self.session.id(), empty = preferences.is_empty(), "Cosmetic preference submitted");
        self.session.set_cosmetic_preferences(preferences).await;
    }

    /// Store body type and style; both blank clears the preference
    pub async fn submit_style(&self, body_type: &str, style: &str) {
        let (body_type, style) = (body_type.trim(), style.trim());
        let preferences = if body_type.is_empty() && style.is_empty() {
            None
        } else {
            Some(StylePreferences {
                body_type: body_type.to_string(),
                style: style.to_string(),
            })
        };
        self.session.set_style_preferences(preferences).await;
    }

    /// Change the cosmetic category shown on the cosmetics screen
    pub async fn select_category(&self, category: &str) {
        self.session.set_selected_cosmetic_category(category).await;
    }
}
