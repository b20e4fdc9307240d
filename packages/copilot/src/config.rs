use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "plume.config.json";

/// Model used when a request does not name one
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Copilot proxy configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopilotConfig {
    /// Fallback key for requests that do not carry their own
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub default_model: String,

    /// Address the HTTP server binds to
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Give up on the upstream call after this many seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}

impl CopilotConfig {
    /// Load config from a directory, falling back to defaults
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override the fallback key; empty values are ignored
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_model: default_model(),
            listen: default_listen(),
            request_timeout_secs: None,
        }
    }
}
