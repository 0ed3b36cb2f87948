//! Integration tests for the health probe.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_without_database() {
    let app = TestApp::new(vec![]).await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "not_configured");
    assert_eq!(response.body["data"]["allocator"], "ok");
}
