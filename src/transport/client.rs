//! [`HttpClient`] backed by reqwest.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// The client every SDK instance uses unless a test injects its own.
///
/// Cloning is cheap. Clones share reqwest's connection pool, which is what
/// lets several `MeshClient` handles reuse the same connections.
///
/// ```no_run
/// use mesh_sdk::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = Url::parse("https://api.ai-agent-mesh.com/v3/account/usage")?;
/// let response = ReqwestClient::new().request(HttpRequest::get(url)).await?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a pre-configured reqwest client (proxy, TLS roots, pool size).
    #[must_use]
    pub const fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = req;

        let mut outgoing = self.inner.request(method, url).headers(headers);
        if let Some(limit) = timeout {
            outgoing = outgoing.timeout(limit);
        }
        if let Some(bytes) = body {
            outgoing = outgoing.body(bytes);
        }

        let reply = outgoing.send().await.map_err(classify)?;
        let status = reply.status();
        let headers = reply.headers().clone();
        let body = reply.bytes().await.map_err(classify)?;

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

/// Sorts a reqwest failure into the three [`HttpError`] cases.
fn classify(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else if err.is_builder() {
        HttpError::InvalidUrl(err.to_string())
    } else {
        HttpError::Connection(Box::new(err))
    }
}
