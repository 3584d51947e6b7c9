//! Error types for message validation.

use thiserror::Error;

/// Reason a message was rejected before any network I/O.
///
/// Validation is deterministic, so none of these are ever retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MessageError {
    /// No message was supplied.
    #[error("message is invalid")]
    Missing,

    /// Neither tokens nor a usable condition were set.
    #[error("topic is invalid or registration ids are not set")]
    InvalidTarget,

    /// More than [`MAX_TOKENS`](super::MAX_TOKENS) recipient tokens.
    #[error("too many registration ids: {count} exceeds {limit}")]
    TooManyTokens {
        /// Number of tokens in the message
        count: usize,
        /// Maximum accepted by the service
        limit: usize,
    },

    /// Android time-to-live above [`MAX_TIME_TO_LIVE_SECS`](super::MAX_TIME_TO_LIVE_SECS).
    #[error("message time-to-live is invalid: {ttl}s exceeds {limit}s")]
    InvalidTimeToLive {
        /// Requested time-to-live in seconds
        ttl: u64,
        /// Maximum accepted by the service
        limit: u64,
    },
}
