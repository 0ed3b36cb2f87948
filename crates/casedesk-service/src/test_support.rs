//! Fixtures shared by the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use casedesk_core::events::DomainEvent;
use casedesk_core::result::AppResult;
use casedesk_core::traits::PushGateway;
use casedesk_core::types::id::UserId;
use casedesk_core::types::push::{DeliveryOutcome, PushMessage};
use casedesk_database::memory::{
    MemoryCaseStore, MemoryEndpointDirectory, MemorySerialAllocator, MemoryUserDirectory,
};
use casedesk_entity::user::{User, UserRole};

use crate::case::CaseService;
use crate::context::RequestContext;
use crate::events::CaseEventPublisher;

pub(crate) fn member(email: &str, department: &str) -> User {
    User {
        id: UserId::new(),
        email: email.to_string(),
        display_name: None,
        role: UserRole::Member,
        department: Some(department.to_string()),
        created_at: Utc::now(),
    }
}

pub(crate) fn seeded_directory(users: Vec<User>) -> MemoryUserDirectory {
    MemoryUserDirectory::with_users(users)
}

/// A case service over in-memory stores.
pub(crate) struct Harness {
    pub cases: CaseService,
    pub serials: Arc<MemorySerialAllocator>,
    pub events: mpsc::Receiver<DomainEvent>,
}

impl Harness {
    pub fn new(users: Vec<User>) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let serials = Arc::new(MemorySerialAllocator::new());
        let cases = CaseService::new(
            Arc::new(MemoryCaseStore::new()),
            serials.clone(),
            Arc::new(seeded_directory(users)),
            CaseEventPublisher::new(tx),
        );
        Self {
            cases,
            serials,
            events: rx,
        }
    }

    pub fn ctx(&self, role: UserRole) -> RequestContext {
        RequestContext::new(UserId::new(), Some("actor@x.com".into()), role)
    }
}

/// Push gateway double that records every call and answers from a script.
#[derive(Default)]
pub(crate) struct RecordingGateway {
    pub calls: Mutex<Vec<PushMessage>>,
    invalid: Vec<String>,
    stray: Vec<String>,
    fail: bool,
}

impl RecordingGateway {
    /// Reports the given tokens as permanently invalid, the rest delivered.
    pub fn with_invalid(tokens: &[&str]) -> Self {
        Self {
            invalid: tokens.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Also reports `token` as invalid on every call, whether or not it was sent.
    pub fn with_stray_invalid(mut self, token: &str) -> Self {
        self.stray.push(token.to_string());
        self
    }

    /// Fails every call as a whole.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn sent_tokens(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|c| c.iter().flat_map(|m| m.tokens.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send_multicast(&self, message: &PushMessage) -> AppResult<Vec<DeliveryOutcome>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(message.clone());
        }
        if self.fail {
            return Err(casedesk_core::AppError::external_service("gateway unreachable"));
        }
        Ok(message
            .tokens
            .iter()
            .map(|t| {
                if self.invalid.contains(t) {
                    DeliveryOutcome::invalid(t)
                } else {
                    DeliveryOutcome::delivered(t)
                }
            })
            .chain(self.stray.iter().map(DeliveryOutcome::invalid))
            .collect())
    }
}

pub(crate) fn endpoints() -> Arc<MemoryEndpointDirectory> {
    Arc::new(MemoryEndpointDirectory::new())
}
