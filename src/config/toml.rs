//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Client configuration section
    #[serde(default)]
    pub client: ClientSection,

    /// Retry configuration section
    #[serde(default)]
    pub retry: RetrySection,
}

/// Client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Application ID
    pub app_id: Option<u64>,

    /// OAuth access token
    pub access_token: Option<String>,

    /// Send endpoint override
    pub endpoint: Option<String>,

    /// Per-attempt request timeout in seconds
    pub timeout: Option<u64>,
}

/// Retry configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Number of retries after the first attempt
    pub attempts: Option<u32>,

    /// Backoff unit in milliseconds
    pub min_backoff_ms: Option<u64>,

    /// Backoff ceiling in milliseconds
    pub max_backoff_ms: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# HCM-PUSH Configuration File

[client]
# Application ID (required, can be overridden by --app-id)
# app_id = 104857600

# OAuth access token sent as "Authorization: Bearer <token>"
# (required, can be overridden by --token)
# access_token = "your-token-here"

# Send endpoint override (default: derived from app_id)
# endpoint = "https://push-api.cloud.huawei.com/v1/104857600/messages:send"

# Per-attempt request timeout in seconds (default: 30)
# timeout = 30

[retry]
# Retries after the first attempt for temporary failures (default: 3)
# attempts = 3

# Backoff unit in milliseconds; retry n waits min_backoff_ms * n^2 (default: 100)
# min_backoff_ms = 100

# Retrying stops once the next wait would exceed this (default: 60000)
# max_backoff_ms = 60000
"#
    .to_string()
}
