//! End-to-end tests for the creation notification fan-out.

use serde_json::json;

use crate::helpers::{Actor, RecordingGateway, TestApp};

fn legal_team() -> (Actor, Actor, Actor) {
    (
        Actor::new("u1@x.com", "member"),
        Actor::new("u2@x.com", "member"),
        Actor::new("u3@x.com", "member"),
    )
}

#[tokio::test]
async fn test_super_admin_case_reaches_department() {
    let (u1, u2, u3) = legal_team();
    let users = vec![u1.as_user("Legal"), u2.as_user("Legal"), u3.as_user("Legal")];
    let app = TestApp::new(users).await;
    app.register_token(&u1, "t1").await;
    app.register_token(&u2, "t2").await;
    app.register_token(&u3, "t3").await;

    let boss = Actor::new("boss@x.com", "super_admin");
    let case = app
        .create_case(
            &boss,
            json!({ "subject": "Lease dispute", "assigned_department": "Legal" }),
        )
        .await;

    let gateway = app.drain_worker().await;
    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);

    let mut tokens = calls[0].tokens.clone();
    tokens.sort();
    assert_eq!(tokens, ["t1", "t2", "t3"]);
    assert_eq!(calls[0].title, "New Legal case: Lease dispute");
    assert_eq!(calls[0].data["case_id"], case["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_invalid_token_is_pruned() {
    let (u1, u2, u3) = legal_team();
    let users = vec![u1.as_user("Legal"), u2.as_user("Legal"), u3.as_user("Legal")];
    let app = TestApp::with_gateway(users, RecordingGateway::with_invalid(&["t2"])).await;
    app.register_token(&u1, "t1").await;
    app.register_token(&u2, "t2").await;
    app.register_token(&u3, "t3").await;
    let endpoints = app.endpoints.clone();

    let boss = Actor::new("boss@x.com", "super_admin");
    app.create_case(
        &boss,
        json!({ "subject": "Lease dispute", "assigned_department": "Legal" }),
    )
    .await;
    app.drain_worker().await;

    let mut remaining: Vec<String> = endpoints.all().await.into_iter().map(|e| e.token).collect();
    remaining.sort();
    assert_eq!(remaining, ["t1", "t3"]);
}

#[tokio::test]
async fn test_member_case_sends_nothing() {
    let (u1, _, _) = legal_team();
    let app = TestApp::new(vec![u1.as_user("Legal")]).await;
    app.register_token(&u1, "t1").await;

    let member = Actor::new("m@x.com", "member");
    app.create_case(
        &member,
        json!({ "subject": "Routine", "assigned_department": "Legal" }),
    )
    .await;

    let gateway = app.drain_worker().await;
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_department_without_endpoints_sends_nothing() {
    let (u1, u2, _) = legal_team();
    let app = TestApp::new(vec![u1.as_user("Legal"), u2.as_user("Legal")]).await;

    let boss = Actor::new("boss@x.com", "super_admin");
    app.create_case(
        &boss,
        json!({ "subject": "Quiet department", "assigned_department": "Legal" }),
    )
    .await;

    let gateway = app.drain_worker().await;
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_admin_filing_for_colleague_is_not_notified() {
    let boss = Actor::new("boss@x.com", "super_admin");
    let u2 = Actor::new("u2@x.com", "member");
    let app = TestApp::new(vec![boss.as_user("Legal"), u2.as_user("Legal")]).await;
    app.register_token(&boss, "boss-token").await;
    app.register_token(&u2, "u2-token").await;

    let case = app
        .create_case(
            &boss,
            json!({
                "subject": "Filed on behalf",
                "assigned_department": "Legal",
                "created_by": { "_id": u2.id.to_string(), "email": "u2@x.com" }
            }),
        )
        .await;
    assert_eq!(case["created_by"], u2.id.to_string());

    let gateway = app.drain_worker().await;
    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tokens, ["u2-token"]);
}
