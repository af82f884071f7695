//! Error taxonomy for the SDK.
//!
//! Every failed call surfaces exactly one [`Error`]. Callers can match on the
//! variant for details or on [`Error::kind`] for the coarse category.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use http::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API key was rejected.
    Authentication,
    /// The requested resource does not exist.
    NotFound,
    /// The platform throttled the caller.
    RateLimit,
    /// The server rejected the shape of the request.
    Validation,
    /// The platform could not be reached.
    Network,
    /// Any other failure.
    Generic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authentication => "authentication",
            Self::NotFound => "not_found",
            Self::RateLimit => "rate_limit",
            Self::Validation => "validation",
            Self::Network => "network",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Error type for SDK operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The API key was rejected (401).
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Fixed, caller-facing message
        message: String,
        /// Message from the server's error body, if any
        server_message: Option<String>,
    },

    /// The requested resource does not exist (404).
    #[error("Resource not found: {path}")]
    NotFound {
        /// The path that was requested
        path: String,
        /// Message from the server's error body, if any
        server_message: Option<String>,
    },

    /// The caller is being throttled (429), after the transport's own retries.
    #[error("Rate limit exceeded{}", retry_hint(.retry_after.as_ref()))]
    RateLimit {
        /// How long the server asked the caller to wait, if it said
        retry_after: Option<Duration>,
        /// Message from the server's error body, if any
        server_message: Option<String>,
    },

    /// The server rejected the request shape (422, or a 400 flagged as
    /// validation by its error body).
    #[error("Validation failed ({status}): {message}")]
    Validation {
        /// HTTP status returned
        status: StatusCode,
        /// Message from the server's error body
        message: String,
        /// Per-field messages, when the server provided them
        fields: BTreeMap<String, String>,
    },

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status returned
        status: StatusCode,
        /// The `message` field of the error body, or the raw body text
        message: String,
        /// Machine-readable error code, if the server provided one
        code: Option<String>,
    },

    /// A success response whose body could not be decoded.
    #[error("Failed to decode response ({status}): {source}")]
    Decode {
        /// HTTP status returned
        status: StatusCode,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The platform could not be reached.
    #[error("Request failed: {message}")]
    Network {
        /// Description of the fault
        message: String,
        /// Underlying transport error
        #[source]
        source: TransportError,
    },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The client was configured with unusable values.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns the coarse category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Network { .. } => ErrorKind::Network,
            Self::Api { .. } | Self::Decode { .. } | Self::Encode(_) | Self::Config(_) => {
                ErrorKind::Generic
            }
        }
    }

    /// Returns the HTTP status that triggered this error, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Authentication { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::RateLimit { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::Validation { status, .. }
            | Self::Api { status, .. }
            | Self::Decode { status, .. } => Some(*status),
            Self::Network { .. } | Self::Encode(_) | Self::Config(_) => None,
        }
    }

    /// Returns the message the server put in its error body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Authentication { server_message, .. }
            | Self::NotFound { server_message, .. }
            | Self::RateLimit { server_message, .. } => server_message.as_deref(),
            Self::Validation { message, .. } | Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns the server's requested wait for a rate-limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns true if this is a transport-level failure.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<TransportError> for Error {
    fn from(source: TransportError) -> Self {
        Self::Network {
            message: source.to_string(),
            source,
        }
    }
}

fn retry_hint(retry_after: Option<&Duration>) -> String {
    retry_after.map_or_else(String::new, |d| format!(" (retry after {}s)", d.as_secs()))
}

/// The useful parts of a JSON error body.
///
/// Each field is read on its own, so an odd type in one of them does not
/// hide the others.
#[derive(Debug, Default)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub code: Option<String>,
    pub fields: Option<Map<String, Value>>,
}

impl ErrorBody {
    /// Yields `None` unless the body is a JSON object.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let Value::Object(mut object) = serde_json::from_slice::<Value>(body).ok()? else {
            return None;
        };

        let message = match object.remove("message") {
            Some(Value::String(text)) => Some(text),
            _ => None,
        };
        let code = match object.remove("code") {
            Some(Value::String(text)) => Some(text),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        };
        let fields = match object.remove("fields") {
            Some(Value::Object(fields)) => Some(fields),
            _ => None,
        };

        Some(Self {
            message,
            code,
            fields,
        })
    }

    /// Per-field messages; non-string values are rendered as JSON.
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .flatten()
            .map(|(name, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), text)
            })
            .collect()
    }

    /// A `fields` object or `code: "validation_error"` marks a request-shape problem.
    pub fn indicates_validation(&self) -> bool {
        self.fields.is_some() || self.code.as_deref() == Some("validation_error")
    }
}
