//! Integration tests for case records, comments and attachments.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{Actor, TestApp};

#[tokio::test]
async fn test_create_case_assigns_serial_and_creator() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");

    let case = app
        .create_case(&actor, json!({ "subject": "Broken badge reader" }))
        .await;

    assert_eq!(case["serial"], 1);
    assert_eq!(case["status"], "pending");
    assert_eq!(case["created_by"], actor.id.to_string());
    assert_eq!(case["created_by_email"], "a@x.com");
    assert_eq!(case["comments"], json!([]));
}

#[tokio::test]
async fn test_serials_are_sequential() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");

    for expected in 1..=3 {
        let case = app
            .create_case(&actor, json!({ "subject": format!("Case {expected}") }))
            .await;
        assert_eq!(case["serial"], expected);
    }
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_contiguous_serials() {
    let app = std::sync::Arc::new(TestApp::new(vec![]).await);
    let actor = Actor::new("a@x.com", "member");

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..20 {
        let app = app.clone();
        let actor = actor.clone();
        tasks.spawn(async move {
            app.create_case(&actor, json!({ "subject": format!("Case {i}") }))
                .await["serial"]
                .as_i64()
                .unwrap()
        });
    }

    let mut serials = tasks.join_all().await;
    serials.sort_unstable();
    assert_eq!(serials, (1..=20).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_explicit_creator_with_inline_actor() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("clerk@x.com", "admin");
    let owner = Actor::new("owner@x.com", "member");

    let case = app
        .create_case(
            &actor,
            json!({
                "subject": "Filed on behalf",
                "created_by": { "_id": owner.id.to_string(), "email": "owner@x.com" }
            }),
        )
        .await;

    assert_eq!(case["created_by"], owner.id.to_string());
    assert_eq!(case["created_by_email"], "owner@x.com");
}

#[tokio::test]
async fn test_unknown_assignees_are_dropped() {
    let legal = Actor::new("u1@x.com", "member");
    let app = TestApp::new(vec![legal.as_user("Legal")]).await;
    let actor = Actor::new("a@x.com", "member");

    let case = app
        .create_case(
            &actor,
            json!({
                "subject": "Contract review",
                "assignees": ["U1@x.com", "ghost@x.com"]
            }),
        )
        .await;

    assert_eq!(case["assignees"], json!([legal.id.to_string()]));
}

#[tokio::test]
async fn test_create_without_subject_is_rejected() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");

    let response = app
        .request("POST", "/api/cases", Some(json!({ "subject": "  " })), Some(&actor))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_client_supplied_serial_is_rejected() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");

    let response = app
        .request(
            "POST",
            "/api/cases",
            Some(json!({ "subject": "Sneaky", "serial": 99 })),
            Some(&actor),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app = TestApp::new(vec![]).await;

    let response = app
        .request("POST", "/api/cases", Some(json!({ "subject": "x" })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_case() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");
    let case = app.create_case(&actor, json!({ "subject": "Lookup" })).await;
    let id = case["id"].as_str().unwrap();

    let response = app
        .request("GET", &format!("/api/cases/{id}"), None, Some(&actor))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["subject"], "Lookup");
}

#[tokio::test]
async fn test_get_unknown_case_is_not_found() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");

    let response = app
        .request(
            "GET",
            &format!("/api/cases/{}", uuid::Uuid::now_v7()),
            None,
            Some(&actor),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/cases/not-an-id", None, Some(&actor))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_keeps_serial() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");
    let case = app.create_case(&actor, json!({ "subject": "Draft" })).await;
    let path = format!("/api/cases/{}", case["id"].as_str().unwrap());

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "subject": "Final", "status": "ongoing" })),
            Some(&actor),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["subject"], "Final");
    assert_eq!(response.body["data"]["status"], "ongoing");
    assert_eq!(response.body["data"]["serial"], case["serial"]);

    let response = app
        .request("PUT", &path, Some(json!({ "serial": 42 })), Some(&actor))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comments_append_in_order() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");
    let case = app.create_case(&actor, json!({ "subject": "Chatty" })).await;
    let path = format!("/api/cases/{}/comments", case["id"].as_str().unwrap());

    for message in ["first", "second"] {
        let response = app
            .request("POST", &path, Some(json!({ "message": message })), Some(&actor))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request("POST", &path, Some(json!({ "message": "third" })), Some(&actor))
        .await;
    let comments = response.body["data"].as_array().unwrap();
    let messages: Vec<&str> = comments
        .iter()
        .map(|c| c["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, ["first", "second", "third"]);
    assert_eq!(comments[0]["author"], actor.id.to_string());
    assert_eq!(comments[0]["author_email"], "a@x.com");
}

#[tokio::test]
async fn test_empty_comment_is_rejected() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");
    let case = app.create_case(&actor, json!({ "subject": "Quiet" })).await;
    let path = format!("/api/cases/{}/comments", case["id"].as_str().unwrap());

    let response = app
        .request("POST", &path, Some(json!({ "message": "" })), Some(&actor))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_attachments_skip_already_stored_objects() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");
    let case = app.create_case(&actor, json!({ "subject": "Evidence" })).await;
    let path = format!("/api/cases/{}/attachments", case["id"].as_str().unwrap());

    let upload = |id: &str| {
        json!({
            "provider_id": id,
            "secure_url": format!("https://files.example.com/{id}"),
            "original_filename": format!("{id}.pdf")
        })
    };

    let response = app
        .request(
            "POST",
            &path,
            Some(json!({ "uploads": [upload("a"), upload("b")] })),
            Some(&actor),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            &path,
            Some(json!({ "uploads": [upload("b"), upload("c")] })),
            Some(&actor),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["file_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["a.pdf", "b.pdf", "c.pdf"]);
}

#[tokio::test]
async fn test_empty_upload_list_is_rejected() {
    let app = TestApp::new(vec![]).await;
    let actor = Actor::new("a@x.com", "member");
    let case = app.create_case(&actor, json!({ "subject": "Nothing" })).await;
    let path = format!("/api/cases/{}/attachments", case["id"].as_str().unwrap());

    let response = app
        .request("POST", &path, Some(json!({ "uploads": [] })), Some(&actor))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
