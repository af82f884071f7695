//! Request dispatcher shared by every resource manager.
//!
//! This module provides:
//! - Client configuration ([`ClientConfig`], [`Credentials`], [`SdkIdentity`])
//! - URL composition ([`join_url`]) and query strings ([`Query`])
//! - The dispatcher itself ([`Dispatcher`]), which sends requests through a
//!   [`RetryingTransport`](crate::transport::RetryingTransport) and turns
//!   responses into parsed JSON or a typed [`Error`](crate::Error)

mod config;
mod dispatcher;
mod headers;
mod url;


pub use config::ClientConfig;
pub use dispatcher::{Dispatcher, classify_response};
pub use headers::{Credentials, SdkIdentity};
pub use url::{Query, join_url};
