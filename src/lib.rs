//! HCM Push: a client for the Huawei Cloud Messaging push send API.
//!
//! The crate validates push messages against the service limits, posts them
//! over HTTP with a bearer token, and retries temporary failures with a
//! quadratic backoff.

pub mod config;
pub mod message;
pub mod push;
pub mod time;
