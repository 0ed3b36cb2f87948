//! In-memory case store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use casedesk_core::AppError;
use casedesk_core::result::AppResult;
use casedesk_core::types::id::CaseId;
use casedesk_entity::case::{Attachment, CaseChanges, CaseRecord, Comment};

use crate::store::CaseStore;

/// Case store keeping every record behind one write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryCaseStore {
    records: Arc<RwLock<HashMap<CaseId, CaseRecord>>>,
}

impl MemoryCaseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CaseStore for MemoryCaseStore {
    async fn insert(&self, record: &CaseRecord) -> AppResult<CaseRecord> {
        let mut records = self.records.write().await;
        if records.values().any(|r| r.serial == record.serial) {
            return Err(AppError::conflict(format!(
                "Case serial {} is already taken",
                record.serial
            )));
        }
        if records.contains_key(&record.id) {
            return Err(AppError::conflict(format!("Case {} already exists", record.id)));
        }
        records.insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn find_by_id(&self, id: CaseId) -> AppResult<Option<CaseRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn apply_changes(
        &self,
        id: CaseId,
        changes: &CaseChanges,
    ) -> AppResult<Option<CaseRecord>> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(&id).map(|record| {
            record.apply(changes.clone());
            record.clone()
        }))
    }

    async fn append_comments(
        &self,
        id: CaseId,
        comments: &[Comment],
    ) -> AppResult<Option<Vec<Comment>>> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(&id).map(|record| {
            record.comments.extend_from_slice(comments);
            record.updated_at = Utc::now();
            record.comments.clone()
        }))
    }

    async fn append_attachments(
        &self,
        id: CaseId,
        attachments: &[Attachment],
    ) -> AppResult<Option<Vec<Attachment>>> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(&id).map(|record| {
            let mut keys = record.attachment_keys();
            for attachment in attachments {
                if keys.insert(attachment.storage_ref.provider_id.clone()) {
                    record.attachments.push(attachment.clone());
                }
            }
            record.updated_at = Utc::now();
            record.attachments.clone()
        }))
    }
}
