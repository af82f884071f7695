//! Resource managers of the platform API.
//!
//! Each manager borrows the client's [`Dispatcher`] and maps one resource
//! family onto paths, queries and bodies. None of them hold state.

use http::Method;
use serde::Serialize;
use serde_json::{Value, json};

use crate::dispatch::{Dispatcher, Query};
use crate::error::Result;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, ReqwestClient};

use super::models::{
    Agent, AgentUpdate, ApplyPolicy, ComplianceReport, CreateAgent, DiscoverQuery,
    FederationConfig, HealthMetrics, JsonObject, Limits, ListAgents, MarketplacePolicy,
    MarketplaceQuery, Policy, TelemetryEvent, TelemetryQuery, Usage, Workflow, WorkflowExecution,
    WorkflowResult,
};

/// Agent lifecycle: create, get, list, update, delete.
#[derive(Debug)]
pub struct AgentManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> AgentManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> AgentManager<'_, H, S> {
    /// Creates an agent.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn create(&self, request: &CreateAgent) -> Result<Agent> {
        self.dispatcher.post("/agents", Some(request)).await
    }

    /// Fetches one agent.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::Error::NotFound) if the agent does not exist.
    pub async fn get(&self, agent_id: &str) -> Result<Agent> {
        self.dispatcher
            .get(&format!("/agents/{agent_id}"), &Query::new())
            .await
    }

    /// Lists agents matching the filters.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn list(&self, filters: &ListAgents) -> Result<Vec<Agent>> {
        self.dispatcher.get("/agents", &filters.to_query()).await
    }

    /// Applies a partial update and returns the updated agent.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn update(&self, agent_id: &str, update: &AgentUpdate) -> Result<Agent> {
        self.dispatcher
            .call(
                Method::PATCH,
                &format!("/agents/{agent_id}"),
                &Query::new(),
                Some(update),
            )
            .await
    }

    /// Deletes an agent.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn delete(&self, agent_id: &str) -> Result<()> {
        self.dispatcher.delete(&format!("/agents/{agent_id}")).await
    }
}

/// Workflow creation, execution and history.
#[derive(Debug)]
pub struct WorkflowManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

#[derive(Serialize)]
struct CreateWorkflowBody<'a> {
    agent_id: &'a str,
    definition: &'a JsonObject,
}

impl<'a, H, S> WorkflowManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> WorkflowManager<'_, H, S> {
    /// Creates a workflow for an agent.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn create(&self, agent_id: &str, definition: &JsonObject) -> Result<Workflow> {
        let body = CreateWorkflowBody {
            agent_id,
            definition,
        };
        self.dispatcher.post("/workflows", Some(&body)).await
    }

    /// Runs a workflow with the given input.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn execute(&self, workflow_id: &str, input: JsonObject) -> Result<WorkflowResult> {
        let body = json!({ "input": input });
        self.dispatcher
            .post(&format!("/workflows/{workflow_id}/execute"), Some(&body))
            .await
    }

    /// Returns up to `limit` past executions.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn history(&self, workflow_id: &str, limit: u32) -> Result<Vec<WorkflowExecution>> {
        self.dispatcher
            .get(
                &format!("/workflows/{workflow_id}/history"),
                &Query::new().push("limit", limit),
            )
            .await
    }
}

/// Governance policies attached to agents.
#[derive(Debug)]
pub struct PolicyManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> PolicyManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> PolicyManager<'_, H, S> {
    /// Attaches a policy to an agent.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn apply(&self, agent_id: &str, policy: &ApplyPolicy) -> Result<Policy> {
        self.dispatcher
            .post(&format!("/agents/{agent_id}/policies"), Some(policy))
            .await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn list(&self, agent_id: &str) -> Result<Vec<Policy>> {
        self.dispatcher
            .get(&format!("/agents/{agent_id}/policies"), &Query::new())
            .await
    }

    /// Evaluates every policy attached to the agent.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn check_compliance(&self, agent_id: &str) -> Result<ComplianceReport> {
        self.dispatcher
            .post::<_, Value>(&format!("/agents/{agent_id}/compliance/check"), None)
            .await
    }
}

/// Telemetry events and health of agents.
#[derive(Debug)]
pub struct TelemetryManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> TelemetryManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> TelemetryManager<'_, H, S> {
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn events(
        &self,
        agent_id: &str,
        filters: &TelemetryQuery,
    ) -> Result<Vec<TelemetryEvent>> {
        self.dispatcher
            .get(
                &format!("/agents/{agent_id}/telemetry"),
                &filters.to_query(),
            )
            .await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn health(&self, agent_id: &str) -> Result<HealthMetrics> {
        self.dispatcher
            .get(&format!("/agents/{agent_id}/health"), &Query::new())
            .await
    }
}

/// Cross-mesh discovery and registration.
#[derive(Debug)]
pub struct FederationManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> FederationManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> FederationManager<'_, H, S> {
    /// Finds agents across the mesh.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn discover(&self, filters: &DiscoverQuery) -> Result<Vec<Agent>> {
        self.dispatcher
            .get("/federation/discover", &filters.to_query())
            .await
    }

    /// Publishes an agent to the federation.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn register(&self, agent_id: &str, config: &JsonObject) -> Result<FederationConfig> {
        self.dispatcher
            .post(&format!("/federation/register/{agent_id}"), Some(config))
            .await
    }
}

/// The policy marketplace.
#[derive(Debug)]
pub struct MarketplaceManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> MarketplaceManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> MarketplaceManager<'_, H, S> {
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn browse(&self, filters: &MarketplaceQuery) -> Result<Vec<MarketplacePolicy>> {
        self.dispatcher
            .get("/marketplace/policies", &filters.to_query())
            .await
    }

    /// Installs a marketplace policy onto an agent.
    ///
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn install(&self, policy_id: &str, agent_id: &str) -> Result<Policy> {
        let body = json!({ "agent_id": agent_id });
        self.dispatcher
            .post(
                &format!("/marketplace/policies/{policy_id}/install"),
                Some(&body),
            )
            .await
    }
}

/// Usage and limits of the calling account.
#[derive(Debug)]
pub struct AccountManager<'a, H = ReqwestClient, S = TokioSleeper> {
    dispatcher: &'a Dispatcher<H, S>,
}

impl<'a, H, S> AccountManager<'a, H, S> {
    pub(crate) const fn new(dispatcher: &'a Dispatcher<H, S>) -> Self {
        Self { dispatcher }
    }
}

impl<H: HttpClient, S: Sleeper> AccountManager<'_, H, S> {
    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn usage(&self) -> Result<Usage> {
        self.dispatcher.get("/account/usage", &Query::new()).await
    }

    /// # Errors
    ///
    /// Any [`Error`](crate::Error) from the request.
    pub async fn limits(&self) -> Result<Limits> {
        self.dispatcher.get("/account/limits", &Query::new()).await
    }
}
