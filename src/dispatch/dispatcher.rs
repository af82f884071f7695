//! The request dispatcher: URL and header assembly, sending, classification.

use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, ErrorBody, Result};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestClient, RetryingTransport,
    TransportError,
};

use super::url::build_url;
use super::{ClientConfig, Query, headers};

/// Message used for every 401 response.
const INVALID_API_KEY: &str = "Invalid API key";

/// Sends requests on behalf of resource managers.
///
/// Owns the immutable client configuration and the transport (and with it
/// the connection pool). Holds no other state, so it can be shared freely
/// between tasks.
///
/// # Example
///
/// ```no_run
/// use mesh_sdk::dispatch::{Dispatcher, Query};
/// use mesh_sdk::ClientConfig;
/// use http::Method;
///
/// # async fn example() -> mesh_sdk::Result<()> {
/// let dispatcher = Dispatcher::new(ClientConfig::platform("sk_live_123"))?;
/// let usage = dispatcher
///     .request(Method::GET, "/account/usage", &Query::new(), None)
///     .await?;
/// println!("{usage:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<H = ReqwestClient, S = TokioSleeper> {
    api_root: String,
    headers: HeaderMap,
    timeout: Duration,
    transport: RetryingTransport<H, S>,
}

impl Dispatcher<ReqwestClient, TokioSleeper> {
    /// Creates a dispatcher backed by a fresh [`ReqwestClient`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the credentials cannot be sent as headers
    /// or the base URL is not a valid absolute URL.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_http_client(config, ReqwestClient::new())
    }
}

impl<H> Dispatcher<H, TokioSleeper> {
    /// Creates a dispatcher on top of any [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the credentials cannot be sent as headers
    /// or the base URL is not a valid absolute URL.
    pub fn with_http_client(config: ClientConfig, client: H) -> Result<Self> {
        let api_root = config.api_root();
        ::url::Url::parse(&api_root)
            .map_err(|e| Error::Config(format!("invalid base URL '{api_root}': {e}")))?;

        let headers = headers::default_headers(&config.credentials, &config.identity)?;
        let transport = RetryingTransport::new(client).with_retry_policy(config.retry_policy);

        Ok(Self {
            api_root,
            headers,
            timeout: config.timeout,
            transport,
        })
    }
}

impl<H, S> Dispatcher<H, S> {
    /// Replaces the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Dispatcher<H, S2> {
        Dispatcher {
            api_root: self.api_root,
            headers: self.headers,
            timeout: self.timeout,
            transport: self.transport.with_sleeper(sleeper),
        }
    }

    /// Base URL with the version segment applied.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &RetryingTransport<H, S> {
        &self.transport
    }
}

impl<H: HttpClient, S: Sleeper> Dispatcher<H, S> {
    /// Sends one logical request and returns the parsed JSON body.
    ///
    /// Returns `Ok(None)` for a success response with an empty body. A JSON
    /// body of any shape (object, array, scalar) is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns the [`Error`] variant matching the response status, or
    /// [`Error::Network`] if the platform could not be reached.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        let body = body.map(serde_json::to_vec).transpose().map_err(Error::Encode)?;
        self.execute(method, path, query, body).await
    }

    /// Sends one logical request with a serializable body and decodes the
    /// response into `T`.
    ///
    /// An empty response body decodes as JSON `null`, which suits `()` and
    /// `Option<_>` targets and is a [`Error::Decode`] for anything else.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request), plus [`Error::Encode`] and
    /// [`Error::Decode`] for (de)serialization failures.
    pub async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let body = body.map(serde_json::to_vec).transpose().map_err(Error::Encode)?;
        let (status, value) = self.execute_with_status(method, path, query, body).await?;

        serde_json::from_value(value.unwrap_or(Value::Null))
            .map_err(|source| Error::Decode { status, source })
    }

    /// GET `path` and decode the response.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        self.call::<T, Value>(Method::GET, path, query, None).await
    }

    /// POST `body` to `path` and decode the response.
    ///
    /// # Errors
    ///
    /// See [`call`](Self::call).
    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.call(Method::POST, path, &Query::new(), body).await
    }

    /// DELETE `path`, discarding any response body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, &Query::new(), None)
            .await
            .map(|_| ())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<Option<Value>> {
        self.execute_with_status(method, path, query, body)
            .await
            .map(|(_, value)| value)
    }

    async fn execute_with_status(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Option<Value>)> {
        let url = build_url(&self.api_root, path, query)?;

        let mut request = HttpRequest::new(method, url)
            .with_headers(self.headers.clone())
            .with_timeout(self.timeout);
        request.body = body;

        let response = self.transport.send(&request).await.map_err(transport_error)?;

        debug!(
            method = %request.method,
            path,
            status = response.status.as_u16(),
            bytes = response.body.len(),
            "received response"
        );

        let value = classify_response(path, &response)?;
        Ok((response.status, value))
    }
}

/// Turns a response into parsed JSON or the matching [`Error`].
///
/// Rules, in order:
/// - 401: [`Error::Authentication`], whatever the body says
/// - 404: [`Error::NotFound`] naming `path`
/// - 429: [`Error::RateLimit`], with `Retry-After` if present
/// - 422, or 400 whose body carries `fields` or `code: "validation_error"`:
///   [`Error::Validation`]
/// - any other status from 400 up: [`Error::Api`] with the body's `message`,
///   falling back to the raw body text
/// - anything else: the JSON body, or `None` if the body is blank
///
/// # Errors
///
/// Returns the error described above, or [`Error::Decode`] if a success
/// body is not valid JSON.
pub fn classify_response(path: &str, response: &HttpResponse) -> Result<Option<Value>> {
    let status = response.status;

    if status.as_u16() < 400 {
        return parse_success_body(response);
    }

    let body = ErrorBody::parse(&response.body);
    let server_message = body.as_ref().and_then(|b| b.message.clone());

    let error = match status {
        StatusCode::UNAUTHORIZED => Error::Authentication {
            message: INVALID_API_KEY.to_string(),
            server_message,
        },
        StatusCode::NOT_FOUND => Error::NotFound {
            path: path.to_string(),
            server_message,
        },
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimit {
            retry_after: response.retry_after(),
            server_message,
        },
        _ => {
            let body = body.unwrap_or_default();
            let is_validation = status == StatusCode::UNPROCESSABLE_ENTITY
                || (status == StatusCode::BAD_REQUEST && body.indicates_validation());
            let message = body
                .message
                .clone()
                .unwrap_or_else(|| fallback_message(response));

            if is_validation {
                Error::Validation {
                    status,
                    message,
                    fields: body.field_messages(),
                }
            } else {
                Error::Api {
                    status,
                    message,
                    code: body.code,
                }
            }
        }
    };

    debug!(status = status.as_u16(), path, kind = %error.kind(), "request failed");
    Err(error)
}

fn parse_success_body(response: &HttpResponse) -> Result<Option<Value>> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&response.body)
        .map(Some)
        .map_err(|source| Error::Decode {
            status: response.status,
            source,
        })
}

/// Raw body text, or the canonical reason phrase when the body is blank.
fn fallback_message(response: &HttpResponse) -> String {
    let text = response.body_text_lossy();
    let text = text.trim();
    if text.is_empty() {
        response
            .status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        text.to_string()
    }
}

fn transport_error(error: TransportError) -> Error {
    match error {
        TransportError::Http(HttpError::InvalidUrl(reason)) => {
            Error::Config(format!("invalid request URL: {reason}"))
        }
        other => Error::from(other),
    }
}
