//! Platform SDK: agents, workflows, governance, telemetry, federation,
//! marketplace and account.
//!
//! [`MeshClient`] owns a [`Dispatcher`](crate::dispatch::Dispatcher) and
//! hands out one manager per resource family.

mod client;
mod models;
mod resources;

#[cfg(test)]
mod models_tests;

pub use client::MeshClient;
pub(crate) use models::null_as_default;
pub use models::{
    Agent, AgentUpdate, ApplyPolicy, ComplianceReport, CreateAgent, DiscoverQuery,
    FederationConfig, HealthMetrics, JsonObject, Limits, ListAgents, MarketplacePolicy,
    MarketplaceQuery, Policy, PolicyViolation, TelemetryEvent, TelemetryQuery, Usage, Workflow,
    WorkflowExecution, WorkflowResult,
};
pub use resources::{
    AccountManager, AgentManager, FederationManager, MarketplaceManager, PolicyManager,
    TelemetryManager, WorkflowManager,
};
