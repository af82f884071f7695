//! Rust client for the AI-Agent Mesh platform and Mesh OS partner APIs.
//!
//! Two clients share one request pipeline:
//!
//! - [`MeshClient`] for the platform API (agents, workflows, policies,
//!   telemetry, federation, marketplace, account)
//! - [`PartnerClient`] for the partner API (tenants, licenses, billing,
//!   webhooks, catalog)
//!
//! Every call goes through a [`Dispatcher`](dispatch::Dispatcher), which
//! composes the URL and headers, sends the request through a
//! [`RetryingTransport`](transport::RetryingTransport) with bounded,
//! exponentially backed-off retries, and classifies the response into a
//! value or one [`Error`].
//!
//! Webhook deliveries are checked with [`verify_signature`].
//!
//! # Example
//!
//! ```no_run
//! use mesh_sdk::{ErrorKind, MeshClient};
//! use mesh_sdk::platform::CreateAgent;
//!
//! # async fn example() -> mesh_sdk::Result<()> {
//! let client = MeshClient::new("sk_live_123")?;
//!
//! match client.agents().get("agent-1").await {
//!     Ok(agent) => println!("{} is {}", agent.name, agent.status),
//!     Err(e) if e.kind() == ErrorKind::NotFound => {
//!         client.agents().create(&CreateAgent::new("support-bot", "langchain")).await?;
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod partner;
pub mod platform;
pub mod signature;
pub mod time;
pub mod transport;

#[cfg(test)]
mod test_fixtures;

pub use dispatch::ClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use partner::PartnerClient;
pub use platform::MeshClient;
pub use signature::verify_signature;
