//! Client configuration and its resolution.
//!
//! Values come from, in order of priority: command-line flags, a JSON
//! config file, then the built-in defaults of the deployed service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// API root of the deployed project service.
pub const DEFAULT_API_URL: &str = "https://l481bschml.execute-api.eu-central-1.amazonaws.com/api";

/// Bucket serving rendered `{id}.wav` outputs.
pub const DEFAULT_ASSET_URL: &str = "https://voicecloning-outputs.s3.eu-central-1.amazonaws.com";

const CONFIG_DIR: &str = "voicecloning";
const CONFIG_FILE: &str = "config.json";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root; `/projects` and `/health` hang off it.
    pub api_url: String,
    /// Base URL of the rendered audio outputs.
    pub asset_url: String,
    /// Request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            asset_url: DEFAULT_ASSET_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub asset_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Default config file location, e.g. `~/.config/voicecloning/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Read a config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicitly given file must exist; the default location is optional.
    pub fn resolve(
        explicit_path: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let base = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        let config = base.with_overrides(overrides);
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.api_url {
            self.api_url = url;
        }
        if let Some(url) = overrides.asset_url {
            self.asset_url = url;
        }
        if overrides.timeout_secs.is_some() {
            self.timeout_secs = overrides.timeout_secs;
        }
        self
    }
}
