//! Transport adapter: an [`HttpClient`] with a bounded retry policy.

use http::StatusCode;
use tracing::{debug, warn};

use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy, TransportError};

/// HTTP transport that retries transient failures within one logical call.
///
/// A response is retried when its status is in the policy's forcelist and
/// the request method is in the allowed set. Connection failures and
/// timeouts are retried under the same bound. The first attempt is never
/// delayed; waits grow exponentially between later attempts.
///
/// When the last allowed attempt still yields a retryable status, that
/// response is returned as-is so the caller can classify it.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use mesh_sdk::transport::{ReqwestClient, RetryPolicy, RetryingTransport};
///
/// let transport = RetryingTransport::new(ReqwestClient::new())
///     .with_retry_policy(RetryPolicy::new().with_total(5));
/// assert_eq!(transport.retry_policy().max_attempts(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct RetryingTransport<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    policy: RetryPolicy,
}

impl<H> RetryingTransport<H, TokioSleeper> {
    /// Creates a transport with the default retry policy and [`TokioSleeper`].
    #[must_use]
    pub fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> RetryingTransport<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryingTransport<H, S2> {
        RetryingTransport {
            client: self.client,
            sleeper,
            policy: self.policy,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the wrapped HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }
}

impl<H: HttpClient, S: Sleeper> RetryingTransport<H, S> {
    /// Sends the request, retrying as the policy allows.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::RetriesExhausted`] when every attempt ended
    /// in a transport fault, and [`TransportError::Http`] for faults that are
    /// never retried (an invalid URL, or a method outside the allowed set).
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut attempt: u32 = 1;

        loop {
            debug!(method = %request.method, url = %request.url, attempt, "sending request");

            match self.client.request(request.clone()).await {
                Ok(response) => {
                    if !self.should_retry_response(request, &response, attempt) {
                        return Ok(response);
                    }

                    let delay = self
                        .policy
                        .delay_before_retry(attempt, retry_after_hint(&response));
                    warn!(
                        method = %request.method,
                        url = %request.url,
                        status = response.status.as_u16(),
                        attempt,
                        max_attempts = self.policy.max_attempts(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "retryable status, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(error) => {
                    self.check_fault_retry(request, error, attempt)?;
                    let delay = self.policy.backoff_for_retry(attempt);
                    self.sleeper.sleep(delay).await;
                }
            }

            attempt += 1;
        }
    }

    fn should_retry_response(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        attempt: u32,
    ) -> bool {
        self.policy.should_retry(attempt)
            && self
                .policy
                .is_retryable_status(&request.method, response.status)
    }

    /// Decides whether a transport fault gets another attempt.
    ///
    /// Returns `Ok(())` to retry, or the terminal error.
    fn check_fault_retry(
        &self,
        request: &HttpRequest,
        error: HttpError,
        attempt: u32,
    ) -> Result<(), TransportError> {
        if !error.is_retryable() || !self.policy.allows_method(&request.method) {
            debug!(
                method = %request.method,
                url = %request.url,
                %error,
                "non-retryable transport fault"
            );
            return Err(TransportError::Http(error));
        }

        if !self.policy.should_retry(attempt) {
            warn!(
                method = %request.method,
                url = %request.url,
                attempts = attempt,
                %error,
                "retries exhausted"
            );
            return Err(TransportError::RetriesExhausted {
                attempts: attempt,
                last_error: error,
            });
        }

        warn!(
            method = %request.method,
            url = %request.url,
            attempt,
            max_attempts = self.policy.max_attempts(),
            %error,
            "transport fault, retrying"
        );
        Ok(())
    }
}

/// `Retry-After` is only meaningful on throttling and maintenance responses.
fn retry_after_hint(response: &HttpResponse) -> Option<std::time::Duration> {
    match response.status {
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => response.retry_after(),
        _ => None,
    }
}
