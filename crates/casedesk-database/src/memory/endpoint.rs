//! In-memory endpoint directory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use casedesk_core::result::AppResult;
use casedesk_core::traits::EndpointDirectory;
use casedesk_core::types::id::UserId;
use casedesk_entity::endpoint::EndpointRegistration;

/// Endpoint directory holding registrations in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryEndpointDirectory {
    registrations: Arc<Mutex<Vec<EndpointRegistration>>>,
}

impl MemoryEndpointDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every registration.
    pub async fn all(&self) -> Vec<EndpointRegistration> {
        self.registrations.lock().await.clone()
    }
}

#[async_trait]
impl EndpointDirectory for MemoryEndpointDirectory {
    async fn register(&self, owner: UserId, token: &str) -> AppResult<bool> {
        let mut regs = self.registrations.lock().await;

        if let Some(pos) = regs.iter().position(|r| r.token == token) {
            if regs[pos].owner_id == owner {
                return Ok(false);
            }
            debug!(owner = %owner, previous = %regs[pos].owner_id, "Endpoint token changed owner");
            regs.remove(pos);
        }

        regs.push(EndpointRegistration::new(owner, token));
        Ok(true)
    }

    async fn resolve(&self, owner: UserId) -> AppResult<Vec<String>> {
        Ok(self
            .registrations
            .lock()
            .await
            .iter()
            .filter(|r| r.owner_id == owner)
            .map(|r| r.token.clone())
            .collect())
    }

    async fn prune(&self, token: &str) -> AppResult<bool> {
        let mut regs = self.registrations.lock().await;
        let before = regs.len();
        regs.retain(|r| r.token != token);
        Ok(regs.len() != before)
    }

    async fn unregister(&self, owner: UserId, token: &str) -> AppResult<bool> {
        let mut regs = self.registrations.lock().await;
        let before = regs.len();
        regs.retain(|r| !(r.owner_id == owner && r.token == token));
        Ok(regs.len() != before)
    }
}
