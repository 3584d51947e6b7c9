//! Push client facade and builder.

use std::future::Future;
use std::time::Duration;

use crate::message::Message;
use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, PushError, ReqwestClient, Response, RetryPolicy, Transport, retry};

/// Base URL of the public push service.
pub const DEFAULT_HOST: &str = "https://push-api.cloud.huawei.com";

/// Default per-attempt request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Returns the send endpoint for `app_id` on the public push service.
#[must_use]
pub fn default_endpoint(app_id: u64) -> String {
    format!("{DEFAULT_HOST}/v1/{app_id}/messages:send")
}

/// Trait for delivering push messages.
///
/// This abstraction lets callers swap the real client for a mock in tests.
pub trait PushSender: Send + Sync {
    /// Sends a message once, without retry.
    ///
    /// # Errors
    ///
    /// Returns the first [`PushError`] encountered.
    fn send(
        &self,
        message: &Message,
        access_token: &str,
    ) -> impl Future<Output = Result<Response, PushError>> + Send;

    /// Sends a message, retrying temporary failures up to `retry_attempts` times.
    ///
    /// # Errors
    ///
    /// Returns a non-temporary [`PushError`] immediately, or the last temporary
    /// one once retries are exhausted.
    fn send_with_retry(
        &self,
        message: &Message,
        access_token: &str,
        retry_attempts: u32,
    ) -> impl Future<Output = Result<Response, PushError>> + Send;
}

/// Client for the push service's HTTP send API.
///
/// Holds only read-only configuration, so one instance can serve any number
/// of concurrent sends.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation (defaults to [`ReqwestClient`])
/// - `S`: The sleeper implementation for retry delays (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use hcm_push::message::Message;
/// use hcm_push::push::{HcmClient, PushSender};
///
/// # async fn example() -> Result<(), hcm_push::push::PushError> {
/// let client = HcmClient::new(104_857_600)?;
/// let message = Message::new().with_tokens(["device-token"]);
///
/// let response = client.send_with_retry(&message, "access-token", 3).await?;
/// if let Some(err) = response.service_error() {
///     eprintln!("rejected by service: {err}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HcmClient<H = ReqwestClient, S = TokioSleeper> {
    transport: Transport<H>,
    sleeper: S,
    retry_policy: RetryPolicy,
}

impl HcmClient {
    /// Creates a client for `app_id` with the default endpoint, timeout, and transport.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::InvalidAppId`] if `app_id` is zero.
    pub fn new(app_id: u64) -> Result<Self, PushError> {
        Self::builder(app_id).build()
    }

    /// Starts building a client for `app_id`.
    #[must_use]
    pub fn builder(app_id: u64) -> ClientBuilder {
        ClientBuilder::new(app_id)
    }
}

impl<H, S> HcmClient<H, S> {
    /// Returns the endpoint messages are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &url::Url {
        self.transport.endpoint()
    }

    /// Returns the per-attempt request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    /// Returns the backoff bounds used by [`PushSender::send_with_retry`].
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<H: HttpClient, S: Sleeper> HcmClient<H, S> {
    /// Validates and encodes a message.
    fn prepare(message: &Message) -> Result<Vec<u8>, PushError> {
        message.validate()?;
        serde_json::to_vec(message).map_err(PushError::Serialization)
    }
}

impl<H: HttpClient, S: Sleeper> PushSender for HcmClient<H, S> {
    async fn send(&self, message: &Message, access_token: &str) -> Result<Response, PushError> {
        let body = Self::prepare(message)?;
        self.transport.send(&body, access_token).await
    }

    async fn send_with_retry(
        &self,
        message: &Message,
        access_token: &str,
        retry_attempts: u32,
    ) -> Result<Response, PushError> {
        // Encoding failures are caller bugs; only the network exchange is retried
        let body = Self::prepare(message)?;

        retry(&self.retry_policy, retry_attempts, &self.sleeper, || {
            self.transport.send(&body, access_token)
        })
        .await
    }
}

/// Builder for [`HcmClient`].
///
/// Options are recorded as given and validated once, in order, by
/// [`build`](Self::build): application ID, endpoint, then timeout.
#[derive(Debug, Clone)]
pub struct ClientBuilder<H = ReqwestClient, S = TokioSleeper> {
    app_id: u64,
    endpoint: Option<String>,
    timeout: Duration,
    http: H,
    sleeper: S,
    retry_policy: RetryPolicy,
}

impl ClientBuilder {
    /// Creates a builder with the default endpoint, timeout, transport, and retry policy.
    #[must_use]
    pub fn new(app_id: u64) -> Self {
        Self {
            app_id,
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
            http: ReqwestClient::new(),
            sleeper: TokioSleeper,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> ClientBuilder<H, S> {
    /// Overrides the endpoint URL derived from the application ID.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the backoff bounds for retried sends.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sets a custom HTTP transport.
    #[must_use]
    pub fn with_http_client<H2>(self, http: H2) -> ClientBuilder<H2, S> {
        ClientBuilder {
            app_id: self.app_id,
            endpoint: self.endpoint,
            timeout: self.timeout,
            http,
            sleeper: self.sleeper,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> ClientBuilder<H, S2> {
        ClientBuilder {
            app_id: self.app_id,
            endpoint: self.endpoint,
            timeout: self.timeout,
            http: self.http,
            sleeper,
            retry_policy: self.retry_policy,
        }
    }

    /// Validates the options and creates the client.
    ///
    /// # Errors
    ///
    /// Returns the first failing check:
    /// - [`PushError::InvalidAppId`] if the application ID is zero
    /// - [`PushError::InvalidEndpoint`] if the endpoint is not a valid URL
    /// - [`PushError::InvalidTimeout`] if the timeout is zero
    pub fn build(self) -> Result<HcmClient<H, S>, PushError> {
        if self.app_id == 0 {
            return Err(PushError::InvalidAppId);
        }

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| default_endpoint(self.app_id));
        let endpoint = url::Url::parse(&endpoint).map_err(|e| PushError::InvalidEndpoint {
            url: endpoint.clone(),
            reason: e.to_string(),
        })?;

        if self.timeout.is_zero() {
            return Err(PushError::InvalidTimeout);
        }

        Ok(HcmClient {
            transport: Transport::new(self.http, endpoint, self.timeout),
            sleeper: self.sleeper,
            retry_policy: self.retry_policy,
        })
    }
}
