//! Tests for platform model (de)serialization.

use chrono::{TimeZone, Utc};
use serde_json::json;

use super::models::{
    Agent, AgentUpdate, ApplyPolicy, CreateAgent, DiscoverQuery, Limits, ListAgents,
    TelemetryQuery, Usage, Workflow,
};

mod responses {
    use super::*;

    #[test]
    fn agent_reads_camel_case_and_type() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "a-1",
            "name": "triage",
            "type": "assistant",
            "config": {"model": "large"},
            "status": "active",
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-03T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(agent.agent_type, "assistant");
        assert_eq!(agent.config["model"], "large");
        assert_eq!(
            agent.created_at,
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        );
    }

    #[test]
    fn workflow_tolerates_missing_optional_fields() {
        let workflow: Workflow =
            serde_json::from_value(json!({"id": "w-1", "agentId": "a-1"})).unwrap();

        assert_eq!(workflow.execution_count, 0);
        assert!(workflow.last_executed.is_none());
        assert!(workflow.definition.is_empty());
    }

    #[test]
    fn usage_reads_gb_fields() {
        let usage: Usage = serde_json::from_value(json!({
            "apiCalls": 1200,
            "agentHours": 3.5,
            "storageGB": 1.25,
            "dataTransferGB": 0.5
        }))
        .unwrap();

        assert_eq!(usage.api_calls, 1200);
        assert!((usage.storage_gb - 1.25).abs() < f64::EPSILON);
        assert!((usage.data_transfer_gb - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn limits_reads_all_fields() {
        let limits: Limits = serde_json::from_value(json!({
            "agents": 10,
            "apiCallsPerMonth": 100_000,
            "storageGB": 50,
            "teamMembers": 5,
            "workflowsPerAgent": 20,
            "apiCallsRemaining": 99_000
        }))
        .unwrap();

        assert_eq!(
            limits,
            Limits {
                agents: 10,
                api_calls_per_month: 100_000,
                storage_gb: 50,
                team_members: 5,
                workflows_per_agent: 20,
                api_calls_remaining: 99_000,
            }
        );
    }
}

mod null_values {
    use super::*;

    #[test]
    fn null_config_reads_as_empty() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "a-1",
            "name": "triage",
            "type": "assistant",
            "config": null,
            "status": "active",
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-02T03:04:05Z"
        }))
        .unwrap();

        assert!(agent.config.is_empty());
    }

    #[test]
    fn null_counters_and_maps_read_as_defaults() {
        let workflow: Workflow = serde_json::from_value(json!({
            "id": "w-1",
            "agentId": "a-1",
            "definition": null,
            "executionCount": null,
            "lastExecuted": null
        }))
        .unwrap();
        let usage: Usage =
            serde_json::from_value(json!({"apiCalls": null, "agentHours": null})).unwrap();

        assert!(workflow.definition.is_empty());
        assert_eq!(workflow.execution_count, 0);
        assert_eq!(usage.api_calls, 0);
    }
}

mod requests {
    use super::*;

    #[test]
    fn create_agent_defaults_to_active() {
        let body = serde_json::to_value(CreateAgent::new("triage", "assistant")).unwrap();

        assert_eq!(
            body,
            json!({"name": "triage", "type": "assistant", "config": {}, "status": "active"})
        );
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let update = AgentUpdate::new();

        assert!(update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({}));
    }

    #[test]
    fn update_sends_only_set_fields() {
        let update = AgentUpdate::new().name("renamed").agent_type("worker");

        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"name": "renamed", "type": "worker"})
        );
    }

    #[test]
    fn apply_policy_defaults_to_monitor() {
        let body = serde_json::to_value(ApplyPolicy::new("pii", "gdpr")).unwrap();

        assert_eq!(body["enforcement_mode"], "monitor");
        assert_eq!(body["rules"], json!({}));
    }
}

mod queries {
    use super::*;

    fn pairs(query: &crate::dispatch::Query) -> Vec<(&str, &str)> {
        query
            .pairs()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn list_agents_always_sends_limit() {
        let query = ListAgents::default().to_query();

        assert_eq!(pairs(&query), vec![("limit", "100")]);
    }

    #[test]
    fn list_agents_with_filters() {
        let query = ListAgents::default()
            .status("active")
            .agent_type("assistant")
            .limit(5)
            .to_query();

        assert_eq!(
            pairs(&query),
            vec![("limit", "5"), ("status", "active"), ("type", "assistant")]
        );
    }

    #[test]
    fn telemetry_uses_snake_case_keys() {
        let query = TelemetryQuery::default()
            .start_date("2024-01-01")
            .event_type("error")
            .to_query();

        assert_eq!(
            pairs(&query),
            vec![("start_date", "2024-01-01"), ("event_type", "error")]
        );
    }

    #[test]
    fn discover_joins_capabilities() {
        let query = DiscoverQuery::default()
            .capability("nlp")
            .capability("vision")
            .region("eu-west-1")
            .to_query();

        assert_eq!(
            pairs(&query),
            vec![("capabilities", "nlp,vision"), ("region", "eu-west-1")]
        );
    }

    #[test]
    fn empty_discover_has_no_params() {
        assert!(DiscoverQuery::default().to_query().is_empty());
    }
}
