//! Application execution logic.
//!
//! Loads the message file, builds the push client, and delivers the
//! message once with retry.

use std::path::{Path, PathBuf};

use thiserror::Error;

use hcm_push::config::ValidatedConfig;
use hcm_push::message::{Message, MessageError};
use hcm_push::push::{HcmClient, PushError, PushSender, ServiceError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to read the message file.
    #[error("Failed to read message file '{}': {source}", path.display())]
    MessageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The message file is not valid JSON for a push message.
    #[error("Failed to parse message file '{}': {source}", path.display())]
    MessageParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The message failed validation before sending.
    #[error("Invalid message: {0}")]
    Message(#[from] MessageError),

    /// The client could not be built or the send failed.
    #[error(transparent)]
    Push(#[from] PushError),

    /// The service accepted the request but rejected the message.
    #[error("Push rejected by service: {0}")]
    Service(#[from] ServiceError),
}

/// Delivery options extracted from validated config.
struct DeliveryOptions<'a> {
    access_token: &'a str,
    retry_attempts: u32,
    dry_run: bool,
}

impl<'a> From<&'a ValidatedConfig> for DeliveryOptions<'a> {
    fn from(config: &'a ValidatedConfig) -> Self {
        Self {
            access_token: &config.access_token,
            retry_attempts: config.retry_attempts,
            dry_run: config.dry_run,
        }
    }
}

/// Sends the configured message.
///
/// # Errors
///
/// Returns an error if:
/// - The message file cannot be read, parsed, or validated
/// - The client options are rejected
/// - Delivery fails after retries
/// - The service reply carries a failure code
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let message = load_message(&config.message_path)?;
    let client = build_client(&config)?;

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - the message will be validated but not sent");
    }

    deliver(&client, &message, &DeliveryOptions::from(&config)).await
}

/// Reads a message from a JSON file.
///
/// A file containing `null` is reported as a missing message.
fn load_message(path: &Path) -> Result<Message, RunError> {
    let content = std::fs::read_to_string(path).map_err(|source| RunError::MessageRead {
        path: path.to_path_buf(),
        source,
    })?;

    let message: Option<Message> =
        serde_json::from_str(&content).map_err(|source| RunError::MessageParse {
            path: path.to_path_buf(),
            source,
        })?;

    message.ok_or(RunError::Message(MessageError::Missing))
}

/// Creates the push client from configuration.
fn build_client(config: &ValidatedConfig) -> Result<HcmClient, PushError> {
    let mut builder = HcmClient::builder(config.app_id)
        .with_timeout(config.timeout)
        .with_retry_policy(config.retry_policy.clone());

    if let Some(ref endpoint) = config.endpoint {
        builder = builder.with_endpoint(endpoint.as_str());
    }

    builder.build()
}

/// Delivers one message and interprets the service reply.
async fn deliver<P: PushSender>(
    sender: &P,
    message: &Message,
    options: &DeliveryOptions<'_>,
) -> Result<(), RunError> {
    if options.dry_run {
        message.validate()?;
        let body = serde_json::to_string(message).map_err(PushError::Serialization)?;
        tracing::info!("Dry-run: would send {body}");
        return Ok(());
    }

    let response = sender
        .send_with_retry(message, options.access_token, options.retry_attempts)
        .await?;

    tracing::info!(
        "Service replied: code={code}, msg={msg}, request_id={request_id}",
        code = response.code,
        msg = response.message,
        request_id = response.request_id,
    );

    if response.is_partial_success() {
        tracing::warn!("Message delivered to only some of the targets");
        return Ok(());
    }

    match response.service_error() {
        Some(err) => Err(RunError::Service(err)),
        None => Ok(()),
    }
}
