//! Shared helpers for the end-to-end tests.
//!
//! Every test starts its own `wiremock` server, so tests stay isolated and
//! can run in parallel.

#![allow(dead_code)]

use mesh_sdk::transport::RetryPolicy;
use mesh_sdk::{ClientConfig, MeshClient, PartnerClient};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Retries enabled, without waiting between attempts.
pub fn fast_retries(total: u32) -> RetryPolicy {
    RetryPolicy::new()
        .with_total(total)
        .with_backoff_factor(0.0)
}

pub fn platform_client(server: &MockServer, retries: u32) -> MeshClient {
    let config = ClientConfig::platform("sk_test")
        .with_base_url(server.uri())
        .with_retry_policy(fast_retries(retries));
    MeshClient::from_config(config).unwrap()
}

pub fn partner_client(server: &MockServer, retries: u32) -> PartnerClient {
    let config = ClientConfig::partner("pk_test", "partner-42")
        .with_base_url(server.uri())
        .with_retry_policy(fast_retries(retries));
    PartnerClient::from_config(config).unwrap()
}

pub fn agent(id: &str) -> Value {
    json!({
        "id": id,
        "name": "support-bot",
        "type": "langchain",
        "config": {"model": "gpt-4"},
        "status": "active",
        "createdAt": "2024-01-02T03:04:05Z",
        "updatedAt": "2024-01-03T03:04:05Z"
    })
}

pub fn tenant(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Acme Corp",
        "region": "us-east-1",
        "plan": "professional",
        "status": "active",
        "partnerId": "partner-42",
        "createdAt": "2024-01-02T03:04:05Z"
    })
}
