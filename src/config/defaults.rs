//! Default values for configuration options.
//!
//! The request timeout and backoff bounds default to the client's own values
//! ([`DEFAULT_TIMEOUT`], [`RetryPolicy::DEFAULT_MIN_BACKOFF`] and
//! [`RetryPolicy::DEFAULT_MAX_BACKOFF`]); only settings the client leaves to
//! its caller are defined here.
//!
//! [`DEFAULT_TIMEOUT`]: crate::push::DEFAULT_TIMEOUT
//! [`RetryPolicy::DEFAULT_MIN_BACKOFF`]: crate::push::RetryPolicy::DEFAULT_MIN_BACKOFF
//! [`RetryPolicy::DEFAULT_MAX_BACKOFF`]: crate::push::RetryPolicy::DEFAULT_MAX_BACKOFF

/// Default number of retries after the first attempt.
pub const RETRY_ATTEMPTS: u32 = 3;
