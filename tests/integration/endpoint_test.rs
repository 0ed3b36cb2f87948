//! Integration tests for push endpoint registration.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{Actor, TestApp};

#[tokio::test]
async fn test_register_is_idempotent() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");

    let first = app
        .request("POST", "/api/endpoints", Some(json!({ "token": "t1" })), Some(&actor))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["changed"], true);

    let second = app
        .request("POST", "/api/endpoints", Some(json!({ "token": "t1" })), Some(&actor))
        .await;
    assert_eq!(second.body["data"]["changed"], false);
    assert_eq!(app.endpoints.all().await.len(), 1);
}

#[tokio::test]
async fn test_token_moves_to_new_owner() {
    let app = TestApp::new(vec![]).await;
    let alice = Actor::new("alice@x.com", "member");
    let bob = Actor::new("bob@x.com", "member");

    app.register_token(&alice, "shared-device").await;
    app.register_token(&bob, "shared-device").await;

    let all = app.endpoints.all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].owner_id, bob.id);
}

#[tokio::test]
async fn test_blank_token_is_rejected() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");

    let response = app
        .request("POST", "/api/endpoints", Some(json!({ "token": "" })), Some(&actor))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unregister_only_own_token() {
    let app = TestApp::new(vec![]).await;
    let alice = Actor::new("alice@x.com", "member");
    let mallory = Actor::new("mallory@x.com", "member");
    app.register_token(&alice, "t1").await;

    let response = app
        .request("DELETE", "/api/endpoints/t1", None, Some(&mallory))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.endpoints.all().await.len(), 1);

    let response = app
        .request("DELETE", "/api/endpoints/t1", None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.endpoints.all().await.is_empty());
}
