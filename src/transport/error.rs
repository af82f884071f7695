//! Failures below the HTTP status line.

use thiserror::Error;

/// Why a single exchange produced no response at all.
#[derive(Debug, Error)]
pub enum HttpError {
    /// DNS, refused or reset connections, TLS failures, broken bodies.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Request timed out")]
    Timeout,

    /// The request could not even be built. Retrying will not help.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Connection faults and timeouts may clear up on a later attempt.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }
}

/// What [`RetryingTransport`](super::RetryingTransport) returns when it has
/// no response to hand back.
///
/// A retryable status that persists through the last attempt is not an
/// error at this layer; the final response is returned for classification.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed after {attempts} attempt(s): {last_error}")]
    RetriesExhausted {
        /// Includes the first attempt
        attempts: u32,
        #[source]
        last_error: HttpError,
    },

    /// Failed once and was not eligible for another try.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl TransportError {
    #[must_use]
    pub const fn http_error(&self) -> &HttpError {
        match self {
            Self::RetriesExhausted { last_error, .. } | Self::Http(last_error) => last_error,
        }
    }
}
