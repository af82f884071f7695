//! End-to-end tests of `MeshClient` over real HTTP.

use mesh_sdk::platform::{AgentUpdate, CreateAgent, JsonObject, ListAgents};
use mesh_sdk::{Error, ErrorKind};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{agent, platform_client};

#[tokio::test]
async fn create_agent_sends_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents"))
        .and(header("authorization", "Bearer sk_test"))
        .and(header("content-type", "application/json"))
        .and(header("x-sdk-language", "rust"))
        .and(body_json(json!({
            "name": "support-bot",
            "type": "langchain",
            "config": {},
            "status": "active"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(agent("a-1")))
        .expect(1)
        .mount(&server)
        .await;

    let created = platform_client(&server, 0)
        .agents()
        .create(&CreateAgent::new("support-bot", "langchain"))
        .await
        .unwrap();

    assert_eq!(created.id, "a-1");
    assert_eq!(created.config["model"], "gpt-4");
}

#[tokio::test]
async fn list_agents_with_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents"))
        .and(query_param("limit", "10"))
        .and(query_param("type", "crewai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([agent("a-1"), agent("a-2")])))
        .expect(1)
        .mount(&server)
        .await;

    let agents = platform_client(&server, 0)
        .agents()
        .list(&ListAgents::default().limit(10).agent_type("crewai"))
        .await
        .unwrap();

    assert_eq!(agents.len(), 2);
}

#[tokio::test]
async fn update_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/agents/a-1"))
        .and(body_json(json!({"status": "paused"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent("a-1")))
        .expect(1)
        .mount(&server)
        .await;

    platform_client(&server, 0)
        .agents()
        .update("a-1", &AgentUpdate::new().status("paused"))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/agents/a-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    platform_client(&server, 0)
        .agents()
        .delete("a-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn execute_workflow_wraps_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workflows/wf-1/execute"))
        .and(body_json(json!({"input": {"ticket": 42}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "exec-1",
            "status": "completed",
            "output": {"answer": "done"},
            "executedAt": "2024-01-02T03:04:05Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let mut input = JsonObject::new();
    input.insert("ticket".into(), json!(42));

    let result = platform_client(&server, 0)
        .workflows()
        .execute("wf-1", input)
        .await
        .unwrap();

    assert_eq!(result.status, "completed");
    assert_eq!(result.output["answer"], "done");
}

#[tokio::test]
async fn account_usage_decodes_unit_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiCalls": 1200,
            "agentHours": 3.5,
            "storageGB": 1.25,
            "dataTransferGB": 0.5
        })))
        .mount(&server)
        .await;

    let usage = platform_client(&server, 0).account().usage().await.unwrap();

    assert_eq!(usage.api_calls, 1200);
    assert!((usage.storage_gb - 1.25).abs() < f64::EPSILON);
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn unauthorized_is_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "key revoked"})),
            )
            .mount(&server)
            .await;

        let err = platform_client(&server, 0)
            .account()
            .limits()
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn missing_agent_is_not_found_with_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/agents/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = platform_client(&server, 0)
            .agents()
            .get("ghost")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("/agents/ghost"));
    }

    #[tokio::test]
    async fn unprocessable_is_validation_with_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/agents"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "invalid agent",
                "fields": {"type": "unknown framework"}
            })))
            .mount(&server)
            .await;

        let err = platform_client(&server, 0)
            .agents()
            .create(&CreateAgent::new("bot", "nope"))
            .await
            .unwrap_err();

        let Error::Validation { fields, .. } = err else {
            panic!("expected a validation error");
        };
        assert_eq!(fields["type"], "unknown framework");
    }

    #[tokio::test]
    async fn plain_text_error_body_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
            ResponseTemplate::new(409).set_body_string("agent is locked"),
        )
            .mount(&server)
            .await;

        let err = platform_client(&server, 0)
            .agents()
            .get("a-1")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.status().map(|s| s.as_u16()), Some(409));
        assert!(err.to_string().contains("agent is locked"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = platform_client(&server, 0)
            .agents()
            .get("a-1")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode { .. }));
    }
}
