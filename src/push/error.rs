//! Error types for push operations.

use thiserror::Error;

use crate::message::MessageError;

/// Capability exposed by errors that the retry loop can reason about.
///
/// The retry orchestrator depends only on this trait, never on concrete
/// error variants.
pub trait Temporary {
    /// Returns true if the same operation might succeed after a delay.
    fn is_temporary(&self) -> bool;

    /// Returns true if the failure was caused by a timeout or unreachable peer.
    fn is_timeout(&self) -> bool;
}

/// Error type for transport handle operations.
///
/// Describes what went wrong on the wire without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and failures while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,
}

/// Every failure a send can surface.
///
/// Only [`PushError::Connection`] and [`PushError::Server`] are temporary;
/// everything else reproduces deterministically and is returned without retry.
#[derive(Debug, Error)]
pub enum PushError {
    /// The application ID was zero.
    #[error("app ID cannot be empty")]
    InvalidAppId,

    /// The endpoint override is not a valid URL.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The rejected endpoint string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The request timeout was zero.
    #[error("Request timeout must be greater than 0")]
    InvalidTimeout,

    /// The access token was empty or not a valid header value.
    #[error("Invalid access token: {0}")]
    InvalidAccessToken(String),

    /// The message failed structural validation.
    #[error("invalid msg: {0}")]
    InvalidMessage(#[from] MessageError),

    /// The message could not be encoded as JSON.
    #[error("cannot create msg json: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request never produced an HTTP response.
    #[error("{0}")]
    Connection(#[from] HttpError),

    /// The service answered with a 5xx status.
    #[error("{status} error: {body}")]
    Server {
        /// Response status
        status: http::StatusCode,
        /// Raw response body for diagnostics
        body: String,
    },

    /// The service answered with any other non-200 status.
    #[error("{status} error: {body}")]
    Client {
        /// Response status
        status: http::StatusCode,
        /// Raw response body for diagnostics
        body: String,
    },

    /// A 200 response carried a body that is not a valid service reply.
    #[error("cannot parse resp body: {0}")]
    ResponseParse(#[source] serde_json::Error),
}

impl PushError {
    /// Returns the HTTP status for `Server` and `Client` errors.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Server { status, .. } | Self::Client { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Temporary for HttpError {
    fn is_temporary(&self) -> bool {
        true
    }

    fn is_timeout(&self) -> bool {
        true
    }
}

impl Temporary for PushError {
    fn is_temporary(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Server { .. })
    }

    fn is_timeout(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
