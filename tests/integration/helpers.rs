//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tower::ServiceExt;

use casedesk_api::AppState;
use casedesk_core::config::AppConfig;
use casedesk_core::result::AppResult;
use casedesk_core::traits::PushGateway;
use casedesk_core::types::id::UserId;
use casedesk_core::types::push::{DeliveryOutcome, PushMessage};
use casedesk_database::memory::{
    MemoryCaseStore, MemoryEndpointDirectory, MemorySerialAllocator, MemoryUserDirectory,
};
use casedesk_entity::user::{User, UserRole};
use casedesk_service::{
    CaseEventPublisher, CaseService, CreationNotifier, EndpointService, NotificationDispatcher,
    NotificationFormatter, NotificationRules,
};
use casedesk_worker::handlers::CaseCreatedNotificationHandler;
use casedesk_worker::{EventExecutor, EventRunner};

const TEST_CONFIG: &str = r#"
[database]
url = "postgres://casedesk@localhost/casedesk_test"

[push]
enabled = true
click_base_url = "https://desk.example.com"

[worker]
concurrency = 2
event_buffer = 64
shutdown_grace_seconds = 1
"#;

/// Identity presented through the proxy headers.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: UserId,
    pub email: String,
    pub role: &'static str,
}

impl Actor {
    pub fn new(email: &str, role: &'static str) -> Self {
        Self {
            id: UserId::new(),
            email: email.to_string(),
            role,
        }
    }

    /// The actor as a directory user in `department`.
    pub fn as_user(&self, department: &str) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            display_name: None,
            role: self.role.parse().unwrap_or(UserRole::Member),
            department: Some(department.to_string()),
            created_at: Utc::now(),
        }
    }
}

/// Push gateway double recording every multicast.
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<PushMessage>>,
    invalid: Vec<String>,
}

impl RecordingGateway {
    pub fn with_invalid(tokens: &[&str]) -> Self {
        Self {
            invalid: tokens.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<PushMessage> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send_multicast(&self, message: &PushMessage) -> AppResult<Vec<DeliveryOutcome>> {
        self.calls.lock().unwrap().push(message.clone());
        Ok(message
            .tokens
            .iter()
            .map(|t| {
                if self.invalid.contains(t) {
                    DeliveryOutcome::invalid(t.clone())
                } else {
                    DeliveryOutcome::delivered(t.clone())
                }
            })
            .collect())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Gateway double behind the notification worker
    pub gateway: Arc<RecordingGateway>,
    /// Endpoint directory, for direct inspection
    pub endpoints: Arc<MemoryEndpointDirectory>,
    shutdown: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl TestApp {
    /// Create a new test application whose directory holds `users`.
    pub async fn new(users: Vec<User>) -> Self {
        Self::with_gateway(users, RecordingGateway::default()).await
    }

    /// Create a test application with a scripted push gateway.
    pub async fn with_gateway(users: Vec<User>, gateway: RecordingGateway) -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");

        let directory = Arc::new(MemoryUserDirectory::with_users(users));
        let endpoints = Arc::new(MemoryEndpointDirectory::new());
        let serials = Arc::new(MemorySerialAllocator::new());
        let gateway = Arc::new(gateway);

        let (event_tx, event_rx) = mpsc::channel(config.worker.event_buffer);
        let case_service = Arc::new(CaseService::new(
            Arc::new(MemoryCaseStore::new()),
            serials.clone(),
            directory.clone(),
            CaseEventPublisher::new(event_tx),
        ));
        let endpoint_service = Arc::new(EndpointService::new(endpoints.clone()));

        let notifier = CreationNotifier::new(
            NotificationRules::new(directory),
            NotificationDispatcher::from_config(gateway.clone(), endpoints.clone(), &config.push),
            NotificationFormatter::new(config.push.click_base_url.clone()),
        );
        let mut executor = EventExecutor::new();
        executor.register(Arc::new(CaseCreatedNotificationHandler::new(notifier)));

        let (shutdown, shutdown_rx) = watch::channel(false);
        let runner = EventRunner::new(event_rx, Arc::new(executor), config.worker.clone());
        let worker = tokio::spawn(runner.run(shutdown_rx));

        let state = AppState {
            config: Arc::new(config),
            database: None,
            serials,
            case_service,
            endpoint_service,
        };

        Self {
            router: casedesk_api::build_app(state),
            gateway,
            endpoints,
            shutdown,
            worker,
        }
    }

    /// Make a request as `actor` (or anonymously).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        actor: Option<&Actor>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(actor) = actor {
            req = req
                .header("x-user-id", actor.id.to_string())
                .header("x-user-email", actor.email.as_str())
                .header("x-user-role", actor.role);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a case and return its `data` payload.
    pub async fn create_case(&self, actor: &Actor, body: Value) -> Value {
        let response = self.request("POST", "/api/cases", Some(body), Some(actor)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"].clone()
    }

    /// Register a push token for `actor`.
    pub async fn register_token(&self, actor: &Actor, token: &str) {
        let response = self
            .request(
                "POST",
                "/api/endpoints",
                Some(serde_json::json!({ "token": token })),
                Some(actor),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    }

    /// Close the event channel and wait for the worker to finish every
    /// queued event.
    pub async fn drain_worker(self) -> Arc<RecordingGateway> {
        drop(self.router);
        tokio::time::timeout(Duration::from_secs(5), self.worker)
            .await
            .expect("worker did not stop")
            .expect("worker panicked");
        drop(self.shutdown);
        self.gateway
    }
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
