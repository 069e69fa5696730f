//! Wizard step enumeration
//!
//! The wizard sits on exactly one step at a time. Transitions are explicit
//! assignments; there is no history stack.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Screen/state of the wizard flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    /// Greeting screen, initial step of every session
    Welcome,
    /// User picks photo analysis or manual selection
    ChooseMethod,
    /// Photo upload
    Upload,
    /// Manual personal color selection
    SelectColor,
    /// Prediction request in flight
    Analyzing,
    /// Personal color result with analysis note
    Result,
    /// Free-text cosmetic preference input
    CosmeticPreference,
    /// Recommended cosmetic products
    Cosmetics,
    /// Body type / style input
    StylePreference,
    /// Fashion recommendations
    FashionRecommendations,
}

impl WizardStep {
    /// Kebab-case identifier used on the wire and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "welcome",
            WizardStep::ChooseMethod => "choose-method",
            WizardStep::Upload => "upload",
            WizardStep::SelectColor => "select-color",
            WizardStep::Analyzing => "analyzing",
            WizardStep::Result => "result",
            WizardStep::CosmeticPreference => "cosmetic-preference",
            WizardStep::Cosmetics => "cosmetics",
            WizardStep::StylePreference => "style-preference",
            WizardStep::FashionRecommendations => "fashion-recommendations",
        }
    }

    /// All steps in flow order
    pub fn all_variants() -> &'static [WizardStep] {
        &[
            WizardStep::Welcome,
            WizardStep::ChooseMethod,
            WizardStep::Upload,
            WizardStep::SelectColor,
            WizardStep::Analyzing,
            WizardStep::Result,
            WizardStep::CosmeticPreference,
            WizardStep::Cosmetics,
            WizardStep::StylePreference,
            WizardStep::FashionRecommendations,
        ]
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::Welcome
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WizardStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WizardStep::all_variants()
            .iter()
            .copied()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown wizard step: {}", s)))
    }
}
