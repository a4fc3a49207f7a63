//! Client configuration with YAML support
//!
//! ```yaml
//! base_url: "https://api.plantpredict.com"
//! credentials:
//!   client_id: "my-client"
//!   client_secret: "..."
//! timeouts:
//!   request_ms: 30000
//!   connect_ms: 10000
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.plantpredict.com";

pub const ENV_BASE_URL: &str = "PLANTPREDICT_BASE_URL";
pub const ENV_CLIENT_ID: &str = "PLANTPREDICT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "PLANTPREDICT_CLIENT_SECRET";

/// PlantPredict client configuration
///
/// Can be loaded from YAML, JSON, the environment, or constructed directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service; resource paths are appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth2 client credentials used by `login()`
    #[serde(default)]
    pub credentials: Option<ClientCredentials>,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// OAuth2 client-credentials pair
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Timeout configuration.
///
/// Unset values leave the transport default in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    /// Whole-request timeout in milliseconds
    #[serde(default)]
    pub request_ms: Option<u64>,

    /// Connect timeout in milliseconds
    #[serde(default)]
    pub connect_ms: Option<u64>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("No client credentials configured")]
    MissingCredentials,

    #[error("{present} is set but {missing} is not")]
    IncompleteCredentials {
        present: &'static str,
        missing: &'static str,
    },
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            timeouts: TimeoutsConfig::default(),
        }
    }

    /// Attach client credentials
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(ClientCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        });
        self
    }

    /// Set the whole-request timeout
    pub fn with_request_timeout_ms(mut self, ms: u64) -> Self {
        self.timeouts.request_ms = Some(ms);
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout_ms(mut self, ms: u64) -> Self {
        self.timeouts.connect_ms = Some(ms);
        self
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Build configuration from `PLANTPREDICT_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(default_base_url);
        let config = Self::new(base_url);

        match (lookup(ENV_CLIENT_ID), lookup(ENV_CLIENT_SECRET)) {
            (Some(id), Some(secret)) => Ok(config.with_credentials(id, secret)),
            (None, None) => Ok(config),
            (Some(_), None) => Err(ConfigError::IncompleteCredentials {
                present: ENV_CLIENT_ID,
                missing: ENV_CLIENT_SECRET,
            }),
            (None, Some(_)) => Err(ConfigError::IncompleteCredentials {
                present: ENV_CLIENT_SECRET,
                missing: ENV_CLIENT_ID,
            }),
        }
    }
}
