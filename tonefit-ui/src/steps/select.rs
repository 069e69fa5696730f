//! Manual personal color selection

use std::sync::Arc;
use tonefit_common::{color, Error, Result, WizardStep};
use tracing::info;

use crate::state::WizardSession;

/// Controller for the select-color step
pub struct SelectColorStep {
    session: Arc<WizardSession>,
}

impl SelectColorStep {
    pub fn new(session: Arc<WizardSession>) -> Self {
        Self { session }
    }

    /// Store a manually chosen color and move to `result`
    ///
    /// Any earlier prediction (class and note) is cleared so the chosen code
    /// is the one used for recommendations.
    pub async fn select(&self, code: &str) -> Result<()> {
        if !color::is_known_code(code) {
            return Err(Error::InvalidInput(format!("Unknown personal color: {}", code)));
        }

        self.session.set_personal_color_class(None).await;
        self.session.set_personal_color_note(None).await;
        self.session.set_personal_color(code).await;
        self.session.set_step(WizardStep::Result).await;

        info!(session_id = %self.session.id(), personal_color = %code, "Personal color selected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_replaces_prediction() {
        let session = Arc::new(WizardSession::new());
        session.set_personal_color_class(Some("summer".to_string())).await;
        session.set_personal_color_note(Some("a | b".to_string())).await;
        let step = SelectColorStep::new(Arc::clone(&session));

        step.select("winter-dark").await.unwrap();

        assert_eq!(session.personal_color().await, "winter-dark");
        assert!(session.personal_color_class().await.is_none());
        assert!(session.personal_color_note().await.is_none());
        assert_eq!(session.step().await, WizardStep::Result);
    }

    #[tokio::test]
    async fn test_select_unknown_code() {
        let session = Arc::new(WizardSession::new());
        let step = SelectColorStep::new(Arc::clone(&session));

        let result = step.select("monsoon-grey").await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(session.personal_color().await, "");
        assert_eq!(session.step().await, WizardStep::Welcome);
    }
}
