//! Entry point of the partner SDK.

use crate::dispatch::{ClientConfig, Dispatcher};
use crate::error::{Error, Result};
use crate::time::TokioSleeper;
use crate::transport::ReqwestClient;

use super::resources::{
    BillingManager, CatalogManager, LicenseManager, TenantManager, WebhookManager,
};

/// Client for the partner management API.
///
/// Every request carries the partner id as `X-Partner-ID`; tenant
/// deployments also include it in the body.
///
/// # Example
///
/// ```no_run
/// use mesh_sdk::PartnerClient;
/// use mesh_sdk::partner::{DeployTenant, IssueLicense};
///
/// # async fn example() -> mesh_sdk::Result<()> {
/// let client = PartnerClient::new("pk_live_123", "partner-42")?;
/// let tenant = client.tenants().deploy(&DeployTenant::new("Acme Corp")).await?;
/// let license = client
///     .licenses()
///     .issue(&IssueLicense::new(&tenant.id).with_type("enterprise"))
///     .await?;
/// println!("license {}", license.key);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PartnerClient<H = ReqwestClient, S = TokioSleeper> {
    dispatcher: Dispatcher<H, S>,
    partner_id: String,
}

impl PartnerClient {
    /// Creates a client for the production partner API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the credentials cannot be sent as headers.
    pub fn new(api_key: impl Into<String>, partner_id: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::partner(api_key, partner_id))
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration has no partner id or
    /// holds unusable settings.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::with_http_client(config, ReqwestClient::new())
    }
}

impl<H> PartnerClient<H, TokioSleeper> {
    /// Creates a client on top of a custom HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration has no partner id or
    /// holds unusable settings.
    pub fn with_http_client(config: ClientConfig, client: H) -> Result<Self> {
        let partner_id = config
            .credentials
            .partner_id()
            .ok_or_else(|| Error::Config("partner id is required".to_string()))?
            .to_string();
        let dispatcher = Dispatcher::with_http_client(config, client)?;

        Ok(Self {
            dispatcher,
            partner_id,
        })
    }
}

impl<H, S> PartnerClient<H, S> {
    /// Replaces the sleeper used between retries.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> PartnerClient<H, S2> {
        PartnerClient {
            dispatcher: self.dispatcher.with_sleeper(sleeper),
            partner_id: self.partner_id,
        }
    }

    #[must_use]
    pub fn partner_id(&self) -> &str {
        &self.partner_id
    }

    /// The dispatcher, for endpoints without a dedicated manager.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<H, S> {
        &self.dispatcher
    }

    #[must_use]
    pub fn tenants(&self) -> TenantManager<'_, H, S> {
        TenantManager::new(&self.dispatcher, &self.partner_id)
    }

    #[must_use]
    pub const fn billing(&self) -> BillingManager<'_, H, S> {
        BillingManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn licenses(&self) -> LicenseManager<'_, H, S> {
        LicenseManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn webhooks(&self) -> WebhookManager<'_, H, S> {
        WebhookManager::new(&self.dispatcher)
    }

    #[must_use]
    pub const fn catalog(&self) -> CatalogManager<'_, H, S> {
        CatalogManager::new(&self.dispatcher)
    }
}
