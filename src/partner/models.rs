//! Records exchanged with the partner API.
//!
//! The partner API speaks camelCase in both directions. Its records grow
//! new fields over time, so every response type keeps whatever it does not
//! model in an `extra` map instead of dropping it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dispatch::Query;
use crate::platform::{JsonObject, null_as_default};

/// A tenant deployed by the partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub branding: JsonObject,
    #[serde(default)]
    pub partner_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Settings for a new tenant.
///
/// ```
/// use mesh_sdk::partner::DeployTenant;
///
/// let tenant = DeployTenant::new("Acme Corp").with_plan("enterprise");
/// assert_eq!(tenant.region, "us-east-1");
/// assert_eq!(tenant.plan, "enterprise");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployTenant {
    pub name: String,
    pub region: String,
    pub plan: String,
    pub domain: Option<String>,
    pub branding: JsonObject,
}

impl DeployTenant {
    pub const DEFAULT_REGION: &'static str = "us-east-1";
    pub const DEFAULT_PLAN: &'static str = "professional";

    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: Self::DEFAULT_REGION.to_string(),
            plan: Self::DEFAULT_PLAN.to_string(),
            domain: None,
            branding: JsonObject::new(),
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    #[must_use]
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = plan.into();
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn with_branding(mut self, branding: JsonObject) -> Self {
        self.branding = branding;
        self
    }
}

/// Filters for listing tenants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTenants {
    pub region: Option<String>,
    pub plan: Option<String>,
    pub status: Option<String>,
}

impl ListTenants {
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .push_opt("region", self.region.as_deref())
            .push_opt("plan", self.plan.as_deref())
            .push_opt("status", self.status.as_deref())
    }
}

/// Partial update of a tenant. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<JsonObject>,
}

impl TenantUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn branding(mut self, branding: JsonObject) -> Self {
        self.branding = Some(branding);
        self
    }
}

/// Usage statistics of a tenant over a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUsage {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Billing state of a tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// A license issued to a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub key: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(rename = "type", default)]
    pub license_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default)]
    pub max_users: Option<u32>,
    #[serde(default)]
    pub max_agents: Option<u32>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Terms of a license to issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLicense {
    pub tenant_id: String,
    #[serde(rename = "type")]
    pub license_type: String,
    /// Days
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_users: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_agents: Option<u32>,
}

impl IssueLicense {
    pub const DEFAULT_TYPE: &'static str = "professional";
    pub const DEFAULT_DURATION_DAYS: u32 = 365;

    /// A one-year professional license.
    #[must_use]
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            license_type: Self::DEFAULT_TYPE.to_string(),
            duration: Self::DEFAULT_DURATION_DAYS,
            features: None,
            max_users: None,
            max_agents: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, license_type: impl Into<String>) -> Self {
        self.license_type = license_type.into();
        self
    }

    #[must_use]
    pub fn with_duration_days(mut self, days: u32) -> Self {
        self.duration = days;
        self
    }

    #[must_use]
    pub fn with_features<I, F>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_max_users(mut self, max_users: u32) -> Self {
        self.max_users = Some(max_users);
        self
    }

    #[must_use]
    pub fn with_max_agents(mut self, max_agents: u32) -> Self {
        self.max_agents = Some(max_agents);
        self
    }
}

/// A webhook subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// A webhook subscription to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateWebhook {
    pub url: String,
    pub events: Vec<String>,
    /// Shared secret the platform signs deliveries with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl CreateWebhook {
    #[must_use]
    pub fn new<I, E>(url: impl Into<String>, events: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        Self {
            url: url.into(),
            events: events.into_iter().map(Into::into).collect(),
            secret: None,
        }
    }

    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// A deployment region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// A subscription plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Partner-wide metrics (revenue, tenant counts, growth) for a period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerMetrics {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}
