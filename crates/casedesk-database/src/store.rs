//! Case-record storage trait.

use async_trait::async_trait;

use casedesk_core::result::AppResult;
use casedesk_core::types::id::CaseId;
use casedesk_entity::case::{Attachment, CaseChanges, CaseRecord, Comment};

/// Persistence for the case-record aggregate.
///
/// Every mutating call is a single atomic write in the backing store. The
/// embedded `comments` and `attachments` collections are only ever extended,
/// so concurrent appenders never lose each other's entries.
#[async_trait]
pub trait CaseStore: Send + Sync + 'static {
    /// Persist a new record. A duplicate serial is a `Conflict`.
    async fn insert(&self, record: &CaseRecord) -> AppResult<CaseRecord>;

    /// Load a record by id.
    async fn find_by_id(&self, id: CaseId) -> AppResult<Option<CaseRecord>>;

    /// Apply a change set in one write; `None` if the record does not exist.
    async fn apply_changes(&self, id: CaseId, changes: &CaseChanges)
    -> AppResult<Option<CaseRecord>>;

    /// Append comments and return the full list in stored order.
    async fn append_comments(
        &self,
        id: CaseId,
        comments: &[Comment],
    ) -> AppResult<Option<Vec<Comment>>>;

    /// Append attachments whose provider id is not yet stored and return the
    /// full list in stored order.
    async fn append_attachments(
        &self,
        id: CaseId,
        attachments: &[Attachment],
    ) -> AppResult<Option<Vec<Attachment>>>;
}
