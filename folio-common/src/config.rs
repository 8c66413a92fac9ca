//! Configuration loading and config file resolution
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `FOLIO_CONFIG` environment variable
//! 3. `<config dir>/folio/config.toml` if it exists
//! 4. Compiled defaults (fallback)
//!
//! A missing config file is not an error: a warning is logged and compiled
//! defaults apply. A config file that exists but fails to parse is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

/// Environment variable overriding the API base URL
pub const API_URL_ENV_VAR: &str = "FOLIO_API_URL";

/// Default API base URL when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Base URL of the content REST API (no trailing `/api`)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// JSON fixture file replacing the bundled fixtures
    #[serde(default)]
    pub fixtures_path: Option<PathBuf>,

    /// Where the session token is persisted after login
    #[serde(default)]
    pub token_path: Option<PathBuf>,

    /// Request timeout in seconds (no timeout when absent)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            fixtures_path: None,
            token_path: None,
            request_timeout_secs: None,
            logging: LoggingConfig::default(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve and load configuration, then apply environment overrides
    ///
    /// Falls back to compiled defaults when no config file is found.
    pub fn resolve(cli_arg: Option<&Path>) -> Result<Self> {
        let mut config = match resolve_config_path(cli_arg) {
            Some(path) if path.exists() => {
                let config = Self::load(&path)?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using compiled defaults",
                    path.display()
                );
                Self::default()
            }
            None => {
                info!("No config file found, using compiled defaults");
                Self::default()
            }
        };

        if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                info!("API base URL overridden by {}", API_URL_ENV_VAR);
                config.api_base_url = url.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Token file location: configured path, else the per-user default
    pub fn token_path(&self) -> PathBuf {
        self.token_path.clone().unwrap_or_else(default_token_path)
    }

    fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api_base_url must start with http:// or https://, got {:?}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(Error::Config(
                "request_timeout_secs must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve which config file to read
///
/// Returns `None` only when no explicit path was given and the per-user
/// default does not exist.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user config file
    default_config_path().filter(|path| path.exists())
}

/// Per-user config file path for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
}

/// Per-user session token path for the platform
fn default_token_path() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("folio").join("session.token"))
        .unwrap_or_else(|| PathBuf::from("./folio-session.token"))
}
