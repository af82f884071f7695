//! Construction-time client configuration.

use std::time::Duration;

use crate::transport::RetryPolicy;

use super::{Credentials, SdkIdentity};

/// Everything a client needs to know at construction time.
///
/// Values are fixed once the client is built.
///
/// # Example
///
/// ```
/// use mesh_sdk::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::platform("sk_live_123")
///     .with_timeout(Duration::from_secs(10))
///     .with_max_retries(5);
///
/// assert_eq!(config.api_root(), "https://api.ai-agent-mesh.com/v3");
/// assert_eq!(config.retry_policy.total, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API
    pub base_url: String,
    /// Version path segment appended to the base URL, if any
    pub api_version: Option<String>,
    /// API key and optional partner id
    pub credentials: Credentials,
    /// Timeout for each HTTP attempt
    pub timeout: Duration,
    /// Retry behaviour of the transport
    pub retry_policy: RetryPolicy,
    /// SDK identification headers
    pub identity: SdkIdentity,
}

impl ClientConfig {
    /// Default platform API base URL (version included).
    pub const PLATFORM_BASE_URL: &'static str = "https://api.ai-agent-mesh.com/v3";

    /// Default partner API base URL.
    pub const PARTNER_BASE_URL: &'static str = "https://partner-api.meshos.io";

    /// Default partner API version segment.
    pub const PARTNER_API_VERSION: &'static str = "v1";

    /// Default request timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Defaults for the platform API.
    #[must_use]
    pub fn platform(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Self::PLATFORM_BASE_URL.to_string(),
            api_version: None,
            credentials: Credentials::new(api_key),
            timeout: Self::DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
            identity: SdkIdentity::PLATFORM,
        }
    }

    /// Defaults for the partner API.
    #[must_use]
    pub fn partner(api_key: impl Into<String>, partner_id: impl Into<String>) -> Self {
        Self {
            base_url: Self::PARTNER_BASE_URL.to_string(),
            api_version: Some(Self::PARTNER_API_VERSION.to_string()),
            credentials: Credentials::new(api_key).with_partner_id(partner_id),
            timeout: Self::DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
            identity: SdkIdentity::PARTNER,
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets or clears the version path segment.
    #[must_use]
    pub fn with_api_version(mut self, version: Option<String>) -> Self {
        self.api_version = version;
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of retries, keeping the rest of the retry policy.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry_policy = self.retry_policy.with_total(max_retries);
        self
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the base URL with the version segment applied.
    #[must_use]
    pub fn api_root(&self) -> String {
        match self.api_version.as_deref().map(|v| v.trim_matches('/')) {
            Some(version) if !version.is_empty() => super::join_url(&self.base_url, version),
            _ => self.base_url.trim_end_matches('/').to_string(),
        }
    }
}
