//! Entry point of the platform SDK.

use crate::dispatch::{ClientConfig, Dispatcher};
use crate::error::Result;
use crate::time::TokioSleeper;
use crate::transport::ReqwestClient;

use super::resources::{
    AccountManager, AgentManager, FederationManager, MarketplaceManager, PolicyManager,
    TelemetryManager, WorkflowManager,
};

/// Client for the AI-Agent Mesh platform API.
///
/// Cheap to share: clone it, or wrap it in an `Arc`, and call it from any
/// number of tasks.
///
/// # Example
///
/// ```no_run
/// use mesh_sdk::MeshClient;
/// use mesh_sdk::platform::ListAgents;
///
/// # async fn example() -> mesh_sdk::Result<()> {
/// let client = MeshClient::new("sk_live_123")?;
/// for agent in client.agents().list(&ListAgents::default().status("active")).await? {
///     println!("{} {}", agent.id, agent.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MeshClient<H = ReqwestClient, S = TokioSleeper> {
    dispatcher: Dispatcher<H, S>,
}

impl MeshClient {
    /// Creates a client for the production API with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the key cannot be
    /// sent as a header.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::platform(api_key))
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) for unusable settings.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Dispatcher::new(config).map(|dispatcher| Self { dispatcher })
    }
}

impl<H> MeshClient<H, TokioSleeper> {
    /// Creates a client on top of a custom HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) for unusable settings.
    pub fn with_http_client(config: ClientConfig, client: H) -> Result<Self> {
        Dispatcher::with_http_client(config, client).map(|dispatcher| Self { dispatcher })
    }
}

impl<H, S> MeshClient<H, S> {
    /// Replaces the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> MeshClient<H, S2> {
        MeshClient {
            dispatcher: self.dispatcher.with_sleeper(sleeper),
        }
    }

    /// The dispatcher, for endpoints without a dedicated manager.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<H, S> {
        &self.dispatcher
    }

    #[must_use]
    pub const fn agents(&self) -> AgentManager<'_, H, S> {
        AgentManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn workflows(&self) -> WorkflowManager<'_, H, S> {
        WorkflowManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn policies(&self) -> PolicyManager<'_, H, S> {
        PolicyManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn telemetry(&self) -> TelemetryManager<'_, H, S> {
        TelemetryManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn federation(&self) -> FederationManager<'_, H, S> {
        FederationManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn marketplace(&self) -> MarketplaceManager<'_, H, S> {
        MarketplaceManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn account(&self) -> AccountManager<'_, H, S> {
        AccountManager::new(&self.dispatcher)
    }
}
