//! Shared test doubles for the push layer.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::time::Sleeper;

/// Mock HTTP client that replays a scripted sequence of outcomes.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn replying(code: &str) -> Self {
        Self::new(vec![Ok(reply(code))])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock client ran out of scripted responses")
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Sleeper that returns immediately and remembers every requested delay.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

impl Sleeper for Arc<RecordingSleeper> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

/// A 200 response carrying a service reply with `code`.
pub fn reply(code: &str) -> HttpResponse {
    let body = format!(r#"{{"code":"{code}","msg":"ok","request_id":"r1"}}"#);
    HttpResponse::new(http::StatusCode::OK, body.into_bytes())
}

/// A response with an arbitrary status and text body.
pub fn status(code: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(code).unwrap(),
        body.as_bytes().to_vec(),
    )
}

/// A transport-level connection failure.
pub fn connection_refused() -> HttpError {
    HttpError::Connection(Box::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    )))
}

pub fn test_url() -> url::Url {
    url::Url::parse("https://push.example.com/v1/42/messages:send").unwrap()
}
