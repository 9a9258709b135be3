mod common;

use axum_test::TestServer;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let server = TestServer::new(common::test_router(common::create_unavailable_state())).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
