//! Configuration parsing and management.
//!
//! Settings load from a TOML file with serde defaults for every field, so an
//! empty (or absent) file yields a working configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::countdown::DEFAULT_CONFIRMATION_WINDOW_SECS;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InscribeConfig {
    /// Inscription service settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local pending-store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Confirmation-window settings.
    #[serde(default)]
    pub confirmation: ConfirmationConfig,
}

impl InscribeConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Loads the given file when it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error only for a file that exists but cannot be loaded; a
    /// missing file is not an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Inscription service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the REST endpoints hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local pending-store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the pending-store database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Confirmation-window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationConfig {
    /// Confirmation window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_db_path() -> PathBuf {
    // ${XDG_STATE_HOME}/inscribe/pending.db, falling back to a dotted
    // directory under the working directory.
    std::env::var("XDG_STATE_HOME").map_or_else(
        |_| PathBuf::from(".inscribe").join("pending.db"),
        |state_dir| PathBuf::from(state_dir).join("inscribe").join("pending.db"),
    )
}

fn default_window_secs() -> u64 {
    DEFAULT_CONFIRMATION_WINDOW_SECS
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}
