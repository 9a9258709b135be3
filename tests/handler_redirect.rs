mod common;

use axum_test::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn test_redirect_success() {
    let (state, _store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    server
        .post("/urls")
        .json(&json!({ "original_url": "https://example.com/target" }))
        .await;

    let response = server.get("/u/1").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/u/abc").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["message"], "URL not found");
}

#[tokio::test]
async fn test_redirect_rejects_non_canonical_codes() {
    let (state, store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    // A row stored under a leading-zero code is never served.
    common::insert_raw(&store, "https://example.com/hidden", "01").await;

    server.get("/u/01").await.assert_status_not_found();
    server.get("/u/a-b").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_skips_rows_with_mismatched_code() {
    let (state, store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    // id 1 stored under the code for id 5
    common::insert_raw(&store, "https://example.com/wrong", "5").await;

    server.get("/u/5").await.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_redirect_store_unavailable() {
    let server = TestServer::new(common::test_router(common::create_unavailable_state())).unwrap();

    server.get("/u/1").await.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_redirect_location_uses_serialized_url() {
    let (state, _store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let created = server
        .post("/urls")
        .json(&json!({ "original_url": "https://example.com/a\nb" }))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(
        created.json::<Value>()["data"]["original_url"],
        "https://example.com/ab"
    );

    let response = server.get("/u/1").await;
    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/ab");
}

#[tokio::test]
async fn test_redirect_location_has_no_surrounding_whitespace() {
    let (state, _store) = common::create_memory_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    server
        .post("/urls")
        .json(&json!({ "original_url": "  https://example.com/lead\t" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server.get("/u/1").await;
    assert_eq!(response.header("location"), "https://example.com/lead");
}
