//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ai-service");
    assert_eq!(body["google_api_configured"], false);
    assert_eq!(body["search_configured"], false);
}

#[tokio::test]
async fn test_health_reports_configured_clients() {
    let app = common::TestApp::builder()
        .gemini("http://127.0.0.1:9")
        .serper("http://127.0.0.1:9")
        .build();

    let (_, body) = app.get_json("/health").await;

    assert_eq!(body["google_api_configured"], true);
    assert_eq!(body["search_configured"], true);
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("alive"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_readiness_endpoint() {
    let (app, _pool) = common::TestApp::with_database().await;

    let (status, body) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ready"));
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["endpoints"]["chat"], "/chat");
    assert_eq!(body["endpoints"]["goals"], "/goals");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let app = common::TestApp::new();

    let (status, _) = app.get("/metrics").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = common::TestApp::new();
    let response = app
        .app
        .clone()
        .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
