//! Retry policy configuration for the transport adapter.

use std::time::Duration;

use http::{Method, StatusCode};

/// Configuration for bounded, exponentially backed-off retries.
///
/// Controls how many extra attempts are made, which response statuses and
/// request methods qualify, and how long to wait between attempts.
///
/// # Defaults
///
/// - `total`: 3 retries (4 attempts in all)
/// - `backoff_factor`: 1.0 second
/// - `max_backoff`: 120 seconds
/// - `status_forcelist`: 429, 500, 502, 503, 504
/// - `allowed_methods`: GET, POST, PUT, PATCH, DELETE
/// - `respect_retry_after`: true
///
/// # Example
///
/// ```
/// use mesh_sdk::transport::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_total(5)
///     .with_backoff_factor(0.5)
///     .with_max_backoff(Duration::from_secs(30));
///
/// assert_eq!(policy.max_attempts(), 6);
/// assert_eq!(policy.backoff_for_retry(3), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    ///
    /// Zero disables retries.
    pub total: u32,

    /// Backoff scale in seconds.
    ///
    /// The wait before retry `n` (1-based) is `backoff_factor * 2^(n-1)`.
    pub backoff_factor: f64,

    /// Upper bound for any single wait.
    pub max_backoff: Duration,

    /// Response statuses that trigger a retry.
    pub status_forcelist: Vec<StatusCode>,

    /// Request methods that may be retried.
    pub allowed_methods: Vec<Method>,

    /// Whether a numeric `Retry-After` header on 429/503 replaces the
    /// computed backoff.
    pub respect_retry_after: bool,
}

impl RetryPolicy {
    /// Default retry count.
    pub const DEFAULT_TOTAL: u32 = 3;

    /// Default backoff factor in seconds.
    pub const DEFAULT_BACKOFF_FACTOR: f64 = 1.0;

    /// Default maximum backoff (120 seconds).
    pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(120);

    /// Default retryable statuses.
    pub const DEFAULT_STATUS_FORCELIST: [StatusCode; 5] = [
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::BAD_GATEWAY,
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::GATEWAY_TIMEOUT,
    ];

    /// Creates a new retry policy with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total: Self::DEFAULT_TOTAL,
            backoff_factor: Self::DEFAULT_BACKOFF_FACTOR,
            max_backoff: Self::DEFAULT_MAX_BACKOFF,
            status_forcelist: Self::DEFAULT_STATUS_FORCELIST.to_vec(),
            allowed_methods: default_methods(),
            respect_retry_after: true,
        }
    }

    /// Creates a policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new().with_total(0)
    }

    /// Sets the number of retries after the initial attempt.
    #[must_use]
    pub fn with_total(mut self, total: u32) -> Self {
        self.total = total;
        self
    }

    /// Sets the backoff factor in seconds.
    ///
    /// Zero is allowed and disables waiting between attempts.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is negative or not finite.
    #[must_use]
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        assert!(
            factor >= 0.0 && factor.is_finite(),
            "backoff_factor must be a non-negative finite number"
        );
        self.backoff_factor = factor;
        self
    }

    /// Sets the maximum wait between attempts.
    #[must_use]
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// Replaces the set of retryable statuses.
    #[must_use]
    pub fn with_status_forcelist(mut self, statuses: impl IntoIterator<Item = StatusCode>) -> Self {
        self.status_forcelist = statuses.into_iter().collect();
        self
    }

    /// Replaces the set of retryable methods.
    #[must_use]
    pub fn with_allowed_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.allowed_methods = methods.into_iter().collect();
        self
    }

    /// Enables or disables honouring `Retry-After`.
    #[must_use]
    pub fn with_respect_retry_after(mut self, respect: bool) -> Self {
        self.respect_retry_after = respect;
        self
    }

    /// Total number of attempts, the initial one included.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.total.saturating_add(1)
    }

    /// Returns true if another attempt may follow attempt number `attempt`
    /// (1 = initial attempt).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts()
    }

    /// Returns true if requests with this method may be retried.
    #[must_use]
    pub fn allows_method(&self, method: &Method) -> bool {
        self.allowed_methods.contains(method)
    }

    /// Returns true if a response with this status, for a request with this
    /// method, should be retried.
    #[must_use]
    pub fn is_retryable_status(&self, method: &Method, status: StatusCode) -> bool {
        self.allows_method(method) && self.status_forcelist.contains(&status)
    }

    /// Computes the backoff before retry number `retry` (1 = first retry).
    ///
    /// Returns zero for `retry == 0`, which is the initial attempt.
    #[must_use]
    pub fn backoff_for_retry(&self, retry: u32) -> Duration {
        if retry == 0 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }

        // Exponents past 62 overflow any sane cap anyway
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX).min(62);
        let secs = self.backoff_factor * 2f64.powi(exponent);
        let capped = secs.min(self.max_backoff.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Computes the wait before retry number `retry`, honouring the server's
    /// `Retry-After` hint when the policy allows it.
    #[must_use]
    pub fn delay_before_retry(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(hint) if self.respect_retry_after => hint.min(self.max_backoff),
            _ => self.backoff_for_retry(retry),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

fn default_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ]
}
