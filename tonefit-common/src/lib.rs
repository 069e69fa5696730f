//! # tonefit Common Library
//!
//! Shared code for the tonefit wizard crates:
//! - Error and result types
//! - Configuration loading and base URL resolution
//! - Personal color codes (coarse/detailed/wire formats, display names)
//! - API request/response types
//! - Wizard step enumeration

pub mod api;
pub mod color;
pub mod config;
pub mod error;
pub mod step;

pub use error::{Error, Result};
pub use step::WizardStep;
