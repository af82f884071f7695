//! Transport layer for sending HTTP requests to the platform.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Bounded status-code retries with backoff ([`RetryingTransport`])
//! - Retry policy configuration ([`RetryPolicy`])

mod adapter;
mod client;
mod error;
mod http;
mod retry;

#[cfg(test)]
mod http_tests;

pub use adapter::RetryingTransport;
pub use client::ReqwestClient;
pub use error::{HttpError, TransportError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::RetryPolicy;
