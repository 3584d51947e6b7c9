//! Push layer for delivering messages to the service's HTTP API.
//!
//! This module provides types and traits for:
//! - Abstracting HTTP transports ([`HttpClient`], [`HttpRequest`], [`HttpResponse`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Single-attempt delivery and status classification ([`Transport`])
//! - Bounded quadratic-backoff retry ([`RetryPolicy`], [`retry`])
//! - The client facade ([`HcmClient`], [`ClientBuilder`], [`PushSender`])
//! - Error classification ([`PushError`], [`Temporary`]) and service codes ([`ServiceError`])

mod client;
mod error;
mod http;
mod response;
mod retry;
mod sender;
mod transport;

#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod transport_tests;

pub use client::ReqwestClient;
pub use error::{HttpError, PushError, Temporary};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use response::{RESP_CODE_PARTIAL_SUCCESS, RESP_CODE_SUCCESS, Response, ServiceError};
pub use retry::{RetryPolicy, retry};
pub use sender::{
    ClientBuilder, DEFAULT_HOST, DEFAULT_TIMEOUT, HcmClient, PushSender, default_endpoint,
};
pub use transport::Transport;
