mod common;

use axum::http::StatusCode;
use common::{FailingCache, FixedKeyGenerator, MemoryMappingRepository};
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _stores) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/healthz").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _stores) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/healthz").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("cache").is_some());
    assert!(json["checks"].get("database").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let repository = MemoryMappingRepository::new();
    repository.fail_inserts();

    let state = common::create_test_state_with(
        Arc::new(FailingCache),
        Arc::new(repository),
        Arc::new(FixedKeyGenerator("unused")),
    );
    let server = common::create_test_server(state);

    let response = server.get("/healthz").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["cache"]["status"], "error");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
