//! Library-neutral request and response values, and the [`HttpClient`] seam.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use url::Url;

use super::HttpError;

/// One outgoing request, built with `http` crate types so that callers never
/// touch the underlying HTTP library.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL including any query string
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// Overrides the client-wide timeout for this request only
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// A request with no headers, no body and no timeout override.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    #[must_use]
    pub fn with_body(self, body: Vec<u8>) -> Self {
        Self {
            body: Some(body),
            ..self
        }
    }

    /// Appends a header value. Repeating a name keeps every value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Swaps the whole header map, dropping anything set before.
    #[must_use]
    pub fn with_headers(self, headers: HeaderMap) -> Self {
        Self { headers, ..self }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A fully buffered response. Every status code lands here, errors included.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx only.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as `&str`, or `None` when it is not UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// The body as text with bad byte sequences replaced by U+FFFD.
    #[must_use]
    pub fn body_text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Wait requested by a `Retry-After: <seconds>` header.
    ///
    /// HTTP-date values are ignored and give `None`.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        let raw = self.headers.get(header::RETRY_AFTER)?.to_str().ok()?;
        raw.trim().parse().ok().map(Duration::from_secs)
    }
}

/// Sends a request and buffers the reply.
///
/// The transport and dispatcher are generic over this trait, so unit tests
/// swap in scripted clients while production code uses
/// [`ReqwestClient`](super::ReqwestClient).
///
/// ```ignore
/// use mesh_sdk::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Canned(HttpResponse);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Performs one exchange. A 4xx or 5xx reply is still `Ok` here.
    ///
    /// # Errors
    ///
    /// [`HttpError::Timeout`] when no reply arrives in time,
    /// [`HttpError::Connection`] when the exchange fails on the wire, and
    /// [`HttpError::InvalidUrl`] when the request cannot be built.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        T::request(self, req).await
    }
}
