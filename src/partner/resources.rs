//! Resource managers of the partner API.

use http::Method;
use serde::Serialize;
use serde_json::{Value, json};

use crate::dispatch::{Dispatcher, Query};
use crate::error::Result;
use crate::platform::JsonObject;
use crate::signature::verify_signature;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, ReqwestClient};

use super::models::{
    Billing, CreateWebhook, DeployTenant, Invoice, IssueLicense, License, ListTenants, Plan,
    PartnerMetrics, Region, Tenant, TenantUpdate, TenantUsage, Webhook,
};

/// Tenant provisioning and lifecycle.
#[derive(Debug)]
pub struct TenantManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
    partner_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployTenantBody<'a> {
    #[serde(flatten)]
    tenant: &'a DeployTenant,
    partner_id: &'a str,
}

impl<'a, H, S> TenantManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>, partner_id: &'a str) -> Self {
        Self {
            dispatcher,
            partner_id,
        }
    }
}

impl<H: HttpClient, S: Sleeper> TenantManager<'_, H, S> {
    /// Deploys a new tenant owned by this partner.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn deploy(&self, tenant: &DeployTenant) -> Result<Tenant> {
        let body = DeployTenantBody {
            tenant,
            partner_id: self.partner_id,
        };
        self.dispatcher.post("/tenants", Some(&body)).await
    }

    /// # Errors
    ///
    /// [`Error::NotFound`](crate::Error::NotFound) if the tenant does not exist.
    pub async fn get(&self, tenant_id: &str) -> Result<Tenant> {
        self.dispatcher
            .get(&format!("/tenants/{tenant_id}"), &Query::new())
            .await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn list(&self, filters: &ListTenants) -> Result<Vec<Tenant>> {
        self.dispatcher.get("/tenants", &filters.to_query()).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn update(&self, tenant_id: &str, update: &TenantUpdate) -> Result<Tenant> {
        self.dispatcher
            .call(
                Method::PATCH,
                &format!("/tenants/{tenant_id}"),
                &Query::new(),
                Some(update),
            )
            .await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn suspend(&self, tenant_id: &str, reason: &str) -> Result<Tenant> {
        let body = json!({ "reason": reason });
        self.dispatcher
            .post(&format!("/tenants/{tenant_id}/suspend"), Some(&body))
            .await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn resume(&self, tenant_id: &str) -> Result<Tenant> {
        self.dispatcher
            .post::<_, Value>(&format!("/tenants/{tenant_id}/resume"), None)
            .await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn delete(&self, tenant_id: &str) -> Result<()> {
        self.dispatcher
            .delete(&format!("/tenants/{tenant_id}"))
            .await
    }

    /// Replaces the tenant's branding and returns the stored configuration.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn update_branding(
        &self,
        tenant_id: &str,
        branding: &JsonObject,
    ) -> Result<JsonObject> {
        self.dispatcher
            .call(
                Method::PUT,
                &format!("/tenants/{tenant_id}/branding"),
                &Query::new(),
                Some(branding),
            )
            .await
    }

    /// Usage between two ISO-8601 dates, sent as `startDate`/`endDate`.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn usage(
        &self,
        tenant_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<TenantUsage> {
        let query = Query::new()
            .push("startDate", start_date)
            .push("endDate", end_date);
        self.dispatcher
            .get(&format!("/tenants/{tenant_id}/usage"), &query)
            .await
    }
}

/// Billing and invoicing of tenants.
#[derive(Debug)]
pub struct BillingManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> BillingManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> BillingManager<'_, H, S> {
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn get(&self, tenant_id: &str) -> Result<Billing> {
        self.dispatcher
            .get(&format!("/tenants/{tenant_id}/billing"), &Query::new())
            .await
    }

    /// Generates the invoice of `period` for a tenant.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn generate_invoice(&self, tenant_id: &str, period: &str) -> Result<Invoice> {
        let body = json!({ "period": period });
        self.dispatcher
            .post(&format!("/tenants/{tenant_id}/invoices"), Some(&body))
            .await
    }
}

/// License issuance and revocation.
#[derive(Debug)]
pub struct LicenseManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> LicenseManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> LicenseManager<'_, H, S> {
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn issue(&self, license: &IssueLicense) -> Result<License> {
        self.dispatcher.post("/licenses", Some(license)).await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn revoke(&self, license_key: &str) -> Result<()> {
        self.dispatcher
            .delete(&format!("/licenses/{license_key}"))
            .await
    }
}

/// Webhook subscriptions and delivery verification.
#[derive(Debug)]
pub struct WebhookManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> WebhookManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }

    /// Checks a delivery's signature. See [`verify_signature`].
    #[must_use]
    pub fn verify(&self, payload: impl AsRef<[u8]>, signature: &str, secret: &str) -> bool {
        verify_signature(payload, signature, secret)
    }
}

impl<H: HttpClient, S: Sleeper> WebhookManager<'_, H, S> {
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn list(&self) -> Result<Vec<Webhook>> {
        self.dispatcher.get("/webhooks", &Query::new()).await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn create(&self, webhook: &CreateWebhook) -> Result<Webhook> {
        self.dispatcher.post("/webhooks", Some(webhook)).await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn delete(&self, webhook_id: &str) -> Result<()> {
        self.dispatcher
            .delete(&format!("/webhooks/{webhook_id}"))
            .await
    }
}

/// Regions, plans and partner metrics.
#[derive(Debug)]
pub struct CatalogManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> CatalogManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

/// Metrics period used when none is given.
pub const DEFAULT_METRICS_PERIOD: &str = "current_month";

impl<H: HttpClient, S: Sleeper> CatalogManager<'_, H, S> {
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn regions(&self) -> Result<Vec<Region>> {
        self.dispatcher.get("/regions", &Query::new()).await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn plans(&self) -> Result<Vec<Plan>> {
        self.dispatcher.get("/plans", &Query::new()).await
    }

    /// Partner metrics for `period` (`current_month`, `last_month`,
    /// `current_year`, ...).
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn metrics(&self, period: Option<&str>) -> Result<PartnerMetrics> {
        let period = period.unwrap_or(DEFAULT_METRICS_PERIOD);
        self.dispatcher
            .get("/metrics", &Query::new().push("period", period))
            .await
    }
}
