//! Configuration loading and backend base URL resolution
//!
//! Base URL priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`TONEFIT_BASE_URL`)
//! 3. TOML config file (`base_url`)
//! 4. Compiled default (fallback)
//!
//! A missing default config file is not an error: a warning is logged and
//! built-in defaults are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable holding the backend base URL
pub const BASE_URL_ENV: &str = "TONEFIT_BASE_URL";

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    /// Backend base URL (optional, see resolution order)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout for backend calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load configuration
    ///
    /// With an explicit `path`, the file must exist and parse. Without one,
    /// the platform default location is tried and a missing file yields
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;
        let config: TomlConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML {:?}: {}", path, e)))?;
        info!("Loaded TOML configuration from {:?}", path);
        Ok(config)
    }
}

/// Platform config file location (`<config_dir>/tonefit/tonefit-ui.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tonefit").join("tonefit-ui.toml"))
}

/// Where the resolved base URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUrlSource {
    CommandLine,
    Environment,
    TomlFile,
    CompiledDefault,
}

/// Resolve the backend base URL
///
/// Empty or whitespace-only values at any tier are skipped. The result has
/// no trailing `/`.
pub fn resolve_base_url(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> (String, BaseUrlSource) {
    // Priority 1: Command-line argument
    if let Some(url) = cli_arg.filter(|u| is_valid_url_value(u)) {
        return (normalize_base_url(url), BaseUrlSource::CommandLine);
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(env_var_name) {
        if is_valid_url_value(&url) {
            return (normalize_base_url(&url), BaseUrlSource::Environment);
        }
        debug!("Ignoring empty {}", env_var_name);
    }

    // Priority 3: TOML config file
    if let Some(url) = toml_config.base_url.as_deref().filter(|u| is_valid_url_value(u)) {
        return (normalize_base_url(url), BaseUrlSource::TomlFile);
    }

    // Priority 4: Compiled default
    (DEFAULT_BASE_URL.to_string(), BaseUrlSource::CompiledDefault)
}

fn is_valid_url_value(value: &str) -> bool {
    !value.trim().is_empty()
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
