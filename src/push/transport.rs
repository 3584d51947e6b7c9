//! Single-attempt delivery of an encoded message.

use std::time::Duration;

use http::header::{AUTHORIZATION, HeaderValue};

use super::{HttpClient, HttpRequest, HttpResponse, PushError, Response};

/// Performs exactly one POST of an already-encoded message.
///
/// Classifies the outcome without retrying: transport failures become
/// [`PushError::Connection`], 5xx becomes [`PushError::Server`], any other
/// non-200 status becomes [`PushError::Client`]. Service codes inside a 200
/// body are returned untouched in the [`Response`].
#[derive(Debug, Clone)]
pub struct Transport<H> {
    http: H,
    endpoint: url::Url,
    timeout: Duration,
}

impl<H> Transport<H> {
    /// Creates a transport posting to `endpoint`, bounding each attempt by `timeout`.
    #[must_use]
    pub const fn new(http: H, endpoint: url::Url, timeout: Duration) -> Self {
        Self {
            http,
            endpoint,
            timeout,
        }
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    /// Returns the per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<H: HttpClient> Transport<H> {
    /// Sends `body` once with `access_token` as bearer credentials.
    ///
    /// The request and response buffers live only for this call.
    ///
    /// # Errors
    ///
    /// - [`PushError::InvalidAccessToken`] if the token is empty or not a valid header value
    /// - [`PushError::Connection`] if no HTTP response was received (temporary)
    /// - [`PushError::Server`] for 5xx statuses (temporary)
    /// - [`PushError::Client`] for any other non-200 status
    /// - [`PushError::ResponseParse`] if a 200 body is not a service reply
    pub async fn send(&self, body: &[u8], access_token: &str) -> Result<Response, PushError> {
        let request = self.build_request(body, access_token)?;

        tracing::debug!("POST {} ({} bytes)", self.endpoint, body.len());
        let response = self.http.request(request).await?;

        classify(&response)
    }

    fn build_request(&self, body: &[u8], access_token: &str) -> Result<HttpRequest, PushError> {
        let authorization = bearer(access_token)?;

        Ok(HttpRequest::post(self.endpoint.clone())
            .with_json_body(body.to_vec())
            .with_header(AUTHORIZATION, authorization)
            .with_timeout(self.timeout))
    }
}

fn bearer(access_token: &str) -> Result<HeaderValue, PushError> {
    if access_token.is_empty() {
        return Err(PushError::InvalidAccessToken(
            "access token cannot be empty".to_string(),
        ));
    }

    let mut value = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(|e| PushError::InvalidAccessToken(e.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

fn classify(response: &HttpResponse) -> Result<Response, PushError> {
    let status = response.status;

    if status == http::StatusCode::OK {
        let parsed: Response =
            serde_json::from_slice(&response.body).map_err(PushError::ResponseParse)?;
        tracing::debug!(
            "Service replied code={} msg={} request_id={}",
            parsed.code,
            parsed.message,
            parsed.request_id
        );
        return Ok(parsed);
    }

    let body = response.body_lossy();
    if status.is_server_error() {
        Err(PushError::Server { status, body })
    } else {
        Err(PushError::Client { status, body })
    }
}
