//! Log filter setup
//!
//! The subscriber is installed before the config file is read so messages
//! from loading it are kept. Its filter is reloadable; the configured level
//! is swapped in once the config is known.

use tonefit_common::config::LoggingConfig;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Filter used until the config file has been read
pub const DEFAULT_LOG_FILTER: &str = "tonefit_ui=info,tonefit_common=info";

/// Handle for replacing the startup filter
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// `RUST_LOG` if it parses, [`DEFAULT_LOG_FILTER`] otherwise
pub fn startup_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Reloadable layer wrapping `filter`
pub fn reloadable(filter: EnvFilter) -> (reload::Layer<EnvFilter, Registry>, FilterHandle) {
    reload::Layer::new(filter)
}

/// Filter for this workspace's crates at the configured level
pub fn config_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(format!(
        "tonefit_ui={level},tonefit_common={level}",
        level = logging.level
    ))
}

/// Replace the startup filter with the configured level
pub fn apply_config(handle: &FilterHandle, logging: &LoggingConfig) -> Result<(), reload::Error> {
    handle.reload(config_filter(logging))
}
