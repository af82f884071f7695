//! Partner SDK: tenants, licenses, billing, webhooks and the catalog.

mod client;
mod models;
mod resources;

#[cfg(test)]
mod models_tests;

pub use client::PartnerClient;
pub use models::{
    Billing, CreateWebhook, DeployTenant, Invoice, IssueLicense, License, ListTenants,
    PartnerMetrics, Plan, Region, Tenant, TenantUpdate, TenantUsage, Webhook,
};
pub use resources::{
    BillingManager, CatalogManager, DEFAULT_METRICS_PERIOD, LicenseManager, TenantManager,
    WebhookManager,
};
