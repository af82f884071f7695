//! Shared test fixtures for transport and client tests.

use crate::time::Sleeper;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock HTTP client that returns a scripted sequence of results.
///
/// Once the script runs out, every further call gets a 200 with an empty body.
#[derive(Debug, Default)]
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

    /// Replies once with the given status and body.
    pub fn replying(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(response(status, body))])
    }

    /// Replies once with the given status and a JSON body.
    pub fn replying_json(status: u16, body: &serde_json::Value) -> Self {
        Self::replying(status, &body.to_string())
    }

    /// Replies with `status` for every call.
    pub fn always(status: u16, calls: usize) -> Self {
        Self::new((0..calls).map(|_| Ok(response(status, ""))).collect())
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request captured")
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
            .unwrap_or_else(|| Ok(response(200, "")))
    }
}

/// Builds a response with no headers.
pub fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        body.as_bytes().to_vec(),
    )
}

/// Builds a response carrying a `Retry-After` header.
pub fn response_with_retry_after(status: u16, seconds: u64) -> HttpResponse {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::RETRY_AFTER,
        http::HeaderValue::from_str(&seconds.to_string()).unwrap(),
    );
    HttpResponse::new(http::StatusCode::from_u16(status).unwrap(), headers, vec![])
}

/// Sleeper that records requested delays instead of waiting.
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

impl Sleeper for std::sync::Arc<RecordingSleeper> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
