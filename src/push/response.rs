//! Service reply and service-level result codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result code for a fully successful request.
pub const RESP_CODE_SUCCESS: &str = "80000000";

/// Result code for a request accepted but not delivered to every recipient.
pub const RESP_CODE_PARTIAL_SUCCESS: &str = "80100000";

/// The service's reply to a send request.
///
/// An HTTP 200 does not mean delivery succeeded: inspect [`code`](Self::code),
/// or use [`service_error`](Self::service_error) to classify it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Service result code.
    pub code: String,

    /// Human-readable description of the result.
    #[serde(rename = "msg")]
    pub message: String,

    /// Identifier for tracing the request on the service side.
    pub request_id: String,
}

impl Response {
    /// Returns true if every recipient was reached.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == RESP_CODE_SUCCESS
    }

    /// Returns true if the request was accepted but some recipients were not reached.
    #[must_use]
    pub fn is_partial_success(&self) -> bool {
        self.code == RESP_CODE_PARTIAL_SUCCESS
    }

    /// Classifies a non-success code.
    ///
    /// Returns `None` for full and partial success.
    #[must_use]
    pub fn service_error(&self) -> Option<ServiceError> {
        if self.is_success() || self.is_partial_success() {
            return None;
        }
        Some(ServiceError::from_code(&self.code))
    }
}

/// Service-level failure reported inside an HTTP 200 reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("oauth authentication error")]
    OAuth,

    #[error("token expired")]
    TokenExpired,

    #[error("incorrect message structure")]
    InvalidMessage,

    #[error("message body size exceeded the default value (4 KB)")]
    MessageTooBig,

    #[error("messages cannot be sent to the app")]
    CannotSend,

    #[error("invalid token")]
    InvalidToken,

    /// A code with no known meaning.
    #[error("unknown error (code {0})")]
    Unknown(String),
}

impl ServiceError {
    /// Maps a result code to its error; unmapped codes become [`ServiceError::Unknown`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "80200001" => Self::OAuth,
            "80200003" => Self::TokenExpired,
            "80100003" => Self::InvalidMessage,
            "80300008" => Self::MessageTooBig,
            "80300002" => Self::CannotSend,
            "80300007" => Self::InvalidToken,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the service code this error was mapped from.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::OAuth => "80200001",
            Self::TokenExpired => "80200003",
            Self::InvalidMessage => "80100003",
            Self::MessageTooBig => "80300008",
            Self::CannotSend => "80300002",
            Self::InvalidToken => "80300007",
            Self::Unknown(code) => code,
        }
    }
}
