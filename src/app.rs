//! Process-level glue for the `hcm-push` binary.
//!
//! Exit codes, log subscriber setup, and the follow-up advice printed
//! under a configuration error.

use hcm_push::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Process exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// The message was accepted, or the dry run passed (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Flags or config file were unusable; nothing was sent (exit code 1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The message was invalid, delivery failed, or the service rejected it (exit code 2).
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns advice for fixing `error`, if there is any beyond its message.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. }
            if *f == field::APP_ID || *f == field::ACCESS_TOKEN =>
        {
            Some(
                "Credentials can live in a config file: run 'hcm-push init', \
                 fill in [client], then pass it with --config.",
            )
        }
        ConfigError::MissingRequired { field: f, .. } if *f == field::MESSAGE => Some(
            "Pass a JSON message file with --message; it needs a \"token\" list \
             or a \"condition\" to be deliverable.",
        ),
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            Some("Run 'hcm-push init' to write a template listing every supported key.")
        }
        ConfigError::InvalidRetry(_) => {
            Some("Backoff bounds are read from min_backoff_ms and max_backoff_ms under [retry].")
        }
        _ => None,
    }
}

/// Prints the advice for `error` to stderr.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Installs the log subscriber; `RUST_LOG` overrides the verbosity flag.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
