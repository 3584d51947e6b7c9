//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::push::{DEFAULT_TIMEOUT, RetryPolicy};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Application ID (required, non-zero)
    pub app_id: u64,

    /// OAuth access token (required)
    pub access_token: String,

    /// Path to the JSON message file (required)
    pub message_path: PathBuf,

    /// Endpoint override; `None` derives it from the application ID
    pub endpoint: Option<Url>,

    /// Per-attempt request timeout
    pub timeout: Duration,

    /// Retries after the first attempt
    pub retry_attempts: u32,

    /// Backoff bounds
    pub retry_policy: RetryPolicy,

    /// Dry-run mode (validate and encode without sending)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoint = self
            .endpoint
            .as_ref()
            .map_or_else(|| "default".to_string(), ToString::to_string);

        write!(
            f,
            "Config {{ app_id: {}, endpoint: {}, message: {}, timeout: {}s, \
             retry: {}x/{}ms..{}ms, dry_run: {} }}",
            self.app_id,
            endpoint,
            self.message_path.display(),
            self.timeout.as_secs(),
            self.retry_attempts,
            self.retry_policy.min_backoff().as_millis(),
            self.retry_policy.max_backoff().as_millis(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`app_id`, `access_token`, `message`)
    /// - The application ID is zero
    /// - The endpoint is not a valid URL
    /// - The timeout is zero
    /// - The backoff bounds are inconsistent
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let app_id = Self::resolve_app_id(cli, toml)?;
        let access_token = Self::resolve_access_token(cli, toml)?;

        let message_path = cli.message.clone().ok_or_else(|| {
            ConfigError::missing(field::MESSAGE, "Use --message to name the JSON message file")
        })?;

        let endpoint = Self::resolve_endpoint(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;

        // Priority: CLI explicit > TOML > default
        let retry_attempts = cli
            .retry_attempts
            .or_else(|| toml.and_then(|t| t.retry.attempts))
            .unwrap_or(defaults::RETRY_ATTEMPTS);

        let retry_policy = Self::build_retry_policy(toml)?;

        Ok(Self {
            app_id,
            access_token,
            message_path,
            endpoint,
            timeout,
            retry_attempts,
            retry_policy,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_app_id(cli: &Cli, toml: Option<&TomlConfig>) -> Result<u64, ConfigError> {
        let app_id = cli
            .app_id
            .or_else(|| toml.and_then(|t| t.client.app_id))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::APP_ID,
                    "Use --app-id or set client.app_id in config file",
                )
            })?;

        if app_id == 0 {
            return Err(ConfigError::InvalidAppId);
        }

        Ok(app_id)
    }

    fn resolve_access_token(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        cli.token
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.access_token.as_deref()))
            .filter(|token| !token.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| {
                ConfigError::missing(
                    field::ACCESS_TOKEN,
                    "Use --token or set client.access_token in config file",
                )
            })
    }

    fn resolve_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<Url>, ConfigError> {
        let Some(url_str) = cli
            .endpoint
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.endpoint.as_deref()))
        else {
            return Ok(None);
        };

        Url::parse(url_str)
            .map(Some)
            .map_err(|e| ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: e.to_string(),
            })
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > client default
        let timeout = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.client.timeout))
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        if timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(timeout)
    }

    fn build_retry_policy(toml: Option<&TomlConfig>) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        let min_backoff = retry
            .and_then(|r| r.min_backoff_ms)
            .map_or(RetryPolicy::DEFAULT_MIN_BACKOFF, Duration::from_millis);

        let max_backoff = retry
            .and_then(|r| r.max_backoff_ms)
            .map_or(RetryPolicy::DEFAULT_MAX_BACKOFF, Duration::from_millis);

        if min_backoff.is_zero() {
            return Err(ConfigError::InvalidRetry(
                "min_backoff_ms must be greater than 0".to_string(),
            ));
        }

        if max_backoff < min_backoff {
            return Err(ConfigError::InvalidRetry(format!(
                "max_backoff_ms ({}) must be >= min_backoff_ms ({})",
                max_backoff.as_millis(),
                min_backoff.as_millis()
            )));
        }

        Ok(RetryPolicy::new()
            .with_min_backoff(min_backoff)
            .with_max_backoff(max_backoff))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
