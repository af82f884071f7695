//! Credentials, SDK identification, and default request headers.

use std::fmt;

use http::HeaderMap;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT};

use crate::error::{Error, Result};

const X_SDK_VERSION: HeaderName = HeaderName::from_static("x-sdk-version");
const X_SDK_LANGUAGE: HeaderName = HeaderName::from_static("x-sdk-language");
const X_PARTNER_ID: HeaderName = HeaderName::from_static("x-partner-id");

/// API credentials, fixed for the lifetime of a client.
///
/// The `Debug` output never includes the API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    partner_id: Option<String>,
}

impl Credentials {
    /// Creates credentials from an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            partner_id: None,
        }
    }

    /// Attaches a partner identifier, sent as `X-Partner-ID`.
    #[must_use]
    pub fn with_partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the partner identifier, if any.
    #[must_use]
    pub fn partner_id(&self) -> Option<&str> {
        self.partner_id.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("partner_id", &self.partner_id)
            .finish()
    }
}

/// How the SDK identifies itself to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkIdentity {
    /// Product name used in `User-Agent`
    pub name: &'static str,
    /// SDK version, sent as `X-SDK-Version`
    pub version: &'static str,
    /// Implementation language, sent as `X-SDK-Language`
    pub language: &'static str,
}

impl SdkIdentity {
    /// Identity of the platform SDK.
    pub const PLATFORM: Self = Self {
        name: "ai-agent-mesh-sdk-rust",
        version: env!("CARGO_PKG_VERSION"),
        language: "rust",
    };

    /// Identity of the partner SDK.
    pub const PARTNER: Self = Self {
        name: "MeshOS-Partner-SDK-Rust",
        version: env!("CARGO_PKG_VERSION"),
        language: "rust",
    };

    /// Returns the `User-Agent` value, `name/version`.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// Builds the headers sent with every request.
///
/// # Errors
///
/// Returns [`Error::Config`] if the API key or partner id contains
/// characters that are not allowed in a header value.
pub(crate) fn default_headers(
    credentials: &Credentials,
    identity: &SdkIdentity,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = header_value("API key", &format!("Bearer {}", credentials.api_key()))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        header_value("SDK name", &identity.user_agent())?,
    );
    headers.insert(
        X_SDK_VERSION,
        header_value("SDK version", identity.version)?,
    );
    headers.insert(
        X_SDK_LANGUAGE,
        header_value("SDK language", identity.language)?,
    );

    if let Some(partner_id) = credentials.partner_id() {
        headers.insert(X_PARTNER_ID, header_value("partner id", partner_id)?);
    }

    Ok(headers)
}

fn header_value(what: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::Config(format!("{what} contains characters not allowed in a header")))
}
