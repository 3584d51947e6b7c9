//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// HCM-PUSH: send a push message through the HCM HTTP API
///
/// Validates a JSON message file and posts it to the push service,
/// retrying temporary failures with bounded backoff.
#[derive(Debug, Parser)]
#[command(name = "hcm-push")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Application ID the message is sent for (required for send mode)
    #[arg(long = "app-id")]
    pub app_id: Option<u64>,

    /// OAuth access token sent as bearer credentials (required for send mode)
    #[arg(long)]
    pub token: Option<String>,

    /// Path to the JSON message file (required for send mode)
    #[arg(long, short)]
    pub message: Option<PathBuf>,

    /// Override the send endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Per-attempt request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of retries after the first attempt for temporary failures
    #[arg(long = "retry")]
    pub retry_attempts: Option<u32>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Validate and encode the message without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for hcm-push
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "hcm-push.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
