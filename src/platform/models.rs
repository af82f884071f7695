//! Records exchanged with the platform API.
//!
//! Response records use the server's camelCase field names. Request bodies
//! use snake_case, which is what the platform accepts on input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::dispatch::Query;

/// Free-form JSON object.
pub type JsonObject = Map<String, Value>;

/// Reads an explicit `null` as the type's default, like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value: Option<T> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// An AI agent registered on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: JsonObject,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of an agent creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAgent {
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: String,
    pub config: JsonObject,
    pub status: String,
}

impl CreateAgent {
    /// Status given to new agents unless overridden.
    pub const DEFAULT_STATUS: &'static str = "active";

    /// Creates a request with an empty config and status `active`.
    #[must_use]
    pub fn new(name: impl Into<String>, agent_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agent_type: agent_type.into(),
            config: JsonObject::new(),
            status: Self::DEFAULT_STATUS.to_string(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: JsonObject) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Partial update of an agent. Only the fields that are set are sent.
///
/// ```
/// use mesh_sdk::platform::AgentUpdate;
///
/// let update = AgentUpdate::new().status("paused");
/// assert_eq!(
///     serde_json::to_string(&update).unwrap(),
///     r#"{"status":"paused"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl AgentUpdate {
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
    pub fn agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = Some(agent_type.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: JsonObject) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.agent_type.is_none()
            && self.config.is_none()
            && self.status.is_none()
    }
}

/// Filters for listing agents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAgents {
    pub status: Option<String>,
    pub agent_type: Option<String>,
    pub limit: u32,
}

impl ListAgents {
    /// Page size used when none is given.
    pub const DEFAULT_LIMIT: u32 = 100;

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = Some(agent_type.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .push("limit", self.limit)
            .push_opt("status", self.status.as_deref())
            .push_opt("type", self.agent_type.as_deref())
    }
}

impl Default for ListAgents {
    fn default() -> Self {
        Self {
            status: None,
            agent_type: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// A workflow bound to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub agent_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definition: JsonObject,
    #[serde(default, deserialize_with = "null_as_default")]
    pub execution_count: u64,
    #[serde(default)]
    pub last_executed: Option<DateTime<Utc>>,
}

/// Outcome of a workflow execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    pub id: String,
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: JsonObject,
    pub executed_at: DateTime<Utc>,
}

/// One entry of a workflow's execution history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    pub id: String,
    pub workflow_id: String,
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub input: JsonObject,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: JsonObject,
    pub executed_at: DateTime<Utc>,
    /// Milliseconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: u64,
}

/// A governance policy attached to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub framework: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: JsonObject,
    pub enforcement_mode: String,
}

/// Body of a policy application request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyPolicy {
    pub name: String,
    pub framework: String,
    pub rules: JsonObject,
    pub enforcement_mode: String,
}

impl ApplyPolicy {
    /// Enforcement used unless overridden.
    pub const DEFAULT_ENFORCEMENT_MODE: &'static str = "monitor";

    /// Creates a request with no rules in `monitor` mode.
    #[must_use]
    pub fn new(name: impl Into<String>, framework: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            framework: framework.into(),
            rules: JsonObject::new(),
            enforcement_mode: Self::DEFAULT_ENFORCEMENT_MODE.to_string(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: JsonObject) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_enforcement_mode(mut self, mode: impl Into<String>) -> Self {
        self.enforcement_mode = mode.into();
        self
    }
}

/// Result of a compliance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub agent_id: String,
    pub compliant: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub violations: Vec<PolicyViolation>,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyViolation {
    pub policy_name: String,
    pub severity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub id: String,
    pub agent_id: String,
    pub event_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: JsonObject,
    pub timestamp: DateTime<Utc>,
}

/// Filters for telemetry events. Dates are ISO-8601 strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub event_type: Option<String>,
}

impl TelemetryQuery {
    #[must_use]
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .push_opt("start_date", self.start_date.as_deref())
            .push_opt("end_date", self.end_date.as_deref())
            .push_opt("event_type", self.event_type.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub agent_id: String,
    pub health_score: u32,
    pub status: String,
    /// Percentage
    pub uptime: f64,
    pub last_checked: DateTime<Utc>,
}

/// Filters for federation discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub capabilities: Vec<String>,
    pub region: Option<String>,
}

impl DiscoverQuery {
    #[must_use]
    pub fn capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .push_list("capabilities", self.capabilities.as_slice())
            .push_opt("region", self.region.as_deref())
    }
}

/// Federation settings of an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederationConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub agent_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public: bool,
}

/// A policy published on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplacePolicy {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub framework: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: JsonObject,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downloads: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketplaceQuery {
    pub category: Option<String>,
    pub framework: Option<String>,
}

impl MarketplaceQuery {
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .push_opt("category", self.category.as_deref())
            .push_opt("framework", self.framework.as_deref())
    }
}

/// Account consumption for the current billing period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_calls: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agent_hours: f64,
    #[serde(rename = "storageGB", default, deserialize_with = "null_as_default")]
    pub storage_gb: f64,
    #[serde(rename = "dataTransferGB", default, deserialize_with = "null_as_default")]
    pub data_transfer_gb: f64,
}

/// Plan limits of the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: u64,
    #[serde(rename = "apiCallsPerMonth", default, deserialize_with = "null_as_default")]
    pub api_calls_per_month: u64,
    #[serde(rename = "storageGB", default, deserialize_with = "null_as_default")]
    pub storage_gb: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_members: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workflows_per_agent: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_calls_remaining: u64,
}
