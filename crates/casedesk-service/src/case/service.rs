//! Case record service: creation, retrieval and bounded updates.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info};

use casedesk_core::AppError;
use casedesk_core::events::CaseEvent;
use casedesk_core::result::AppResult;
use casedesk_core::traits::serial_allocator::CASE_SEQUENCE;
use casedesk_core::traits::{SerialAllocator, UserDirectory};
use casedesk_core::types::id::CaseId;
use casedesk_database::store::CaseStore;
use casedesk_entity::case::attachment::merge_attachments;
use casedesk_entity::case::{
    ActorRef, CaseChanges, CaseDraft, CaseRecord, CaseUpdate, Comment, CommentDraft,
    NormalizedActor,
};

use crate::context::RequestContext;
use crate::events::CaseEventPublisher;

use super::assignees::resolve_assignees;

/// Owns the case-record aggregate.
#[derive(Clone)]
pub struct CaseService {
    /// Record persistence.
    pub(super) store: Arc<dyn CaseStore>,
    /// Serial sequence.
    serials: Arc<dyn SerialAllocator>,
    /// User directory for assignee lookups.
    directory: Arc<dyn UserDirectory>,
    /// Domain event sink.
    pub(super) events: CaseEventPublisher,
}

impl std::fmt::Debug for CaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseService").finish_non_exhaustive()
    }
}

impl CaseService {
    /// Creates a new case service.
    pub fn new(
        store: Arc<dyn CaseStore>,
        serials: Arc<dyn SerialAllocator>,
        directory: Arc<dyn UserDirectory>,
        events: CaseEventPublisher,
    ) -> Self {
        Self {
            store,
            serials,
            directory,
            events,
        }
    }

    /// Create a case record.
    ///
    /// The serial is allocated only after every input check has passed, and
    /// the creation event is published only after the record is stored.
    pub async fn create(&self, ctx: &RequestContext, draft: CaseDraft) -> AppResult<CaseRecord> {
        draft.validate()?;

        let actor = ctx.actor();
        let department = draft.department();
        let creator = normalize_actor(draft.created_by, &actor);
        let assignees = resolve_assignees(self.directory.as_ref(), &draft.assignees).await?;
        let comments: Vec<Comment> = draft
            .comments
            .into_iter()
            .map(|c| normalize_comment(c, &actor))
            .collect();
        let uploads = draft
            .uploads
            .into_iter()
            .map(|o| o.into_draft(Some(ActorRef::from(actor.clone()))))
            .collect();
        let attachments = merge_attachments(Vec::new(), uploads, &HashSet::new());

        let serial = self.serials.next(CASE_SEQUENCE).await.map_err(|e| {
            error!(error = %e, "Serial allocation failed, case not created");
            e
        })?;

        let now = chrono::Utc::now();
        let record = CaseRecord {
            id: CaseId::new(),
            serial,
            subject: draft.subject.trim().to_string(),
            status: draft.status.unwrap_or_default(),
            assigned_department: department,
            assignees,
            created_by: creator.id,
            created_by_email: creator.email,
            comments,
            attachments,
            details: draft.details,
            created_at: now,
            updated_at: now,
        };

        let record = self.store.insert(&record).await?;

        info!(
            case_id = %record.id,
            serial = record.serial,
            actor = %ctx.user_id,
            department = record.assigned_department.as_deref().unwrap_or(""),
            "Case created"
        );

        self.events.publish(
            Some(ctx.user_id),
            CaseEvent::Created {
                case_id: record.id,
                serial: record.serial,
                subject: record.subject.clone(),
                assigned_department: record.assigned_department.clone(),
                created_by: record.created_by,
                actor: ctx.user_id,
                creator_role: ctx.role.as_str().to_string(),
            },
        );

        Ok(record)
    }

    /// Load a case record.
    pub async fn get(&self, id: CaseId) -> AppResult<CaseRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))
    }

    /// Apply a bounded update.
    ///
    /// Scalar fields are overwritten. Comments and attachments in the
    /// payload are only ever appended: comments whose id is already stored
    /// are skipped, and attachments go through the merge-dedup against the
    /// stored provider ids.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: CaseId,
        update: CaseUpdate,
    ) -> AppResult<CaseRecord> {
        update.validate()?;
        let current = self.get(id).await?;
        let actor = ctx.actor();
        let department = update.department();

        let assignees = match &update.assignees {
            Some(emails) => Some(resolve_assignees(self.directory.as_ref(), emails).await?),
            None => None,
        };

        let new_comments = update
            .comments
            .into_iter()
            .filter(|c| c.id.is_none_or(|cid| !current.has_comment(&cid)))
            .map(|c| normalize_comment(c, &actor))
            .collect();

        // TODO: move the key filter into the store write so concurrent
        // updates of one record cannot append the same provider id twice.
        let uploaded = update
            .uploads
            .into_iter()
            .map(|o| o.into_draft(Some(ActorRef::from(actor.clone()))))
            .collect();
        let new_attachments =
            merge_attachments(update.attachments, uploaded, &current.attachment_keys());

        let changes = CaseChanges {
            subject: update.subject.map(|s| s.trim().to_string()),
            status: update.status,
            assigned_department: department,
            assignees,
            created_by: update.created_by.map(|c| c.normalize().or_email_of(&actor)),
            details: update.details,
            new_comments,
            new_attachments,
        };

        if changes.is_empty() {
            return Ok(current);
        }

        let record = self
            .store
            .apply_changes(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))?;

        info!(
            case_id = %id,
            actor = %ctx.user_id,
            comments_added = changes.new_comments.len(),
            attachments_added = changes.new_attachments.len(),
            "Case updated"
        );

        Ok(record)
    }
}

/// Normalize an optional actor, defaulting to the request actor.
fn normalize_actor(actor: Option<ActorRef>, fallback: &NormalizedActor) -> NormalizedActor {
    match actor {
        Some(a) => a.normalize().or_email_of(fallback),
        None => fallback.clone(),
    }
}

fn normalize_comment(mut draft: CommentDraft, fallback: &NormalizedActor) -> Comment {
    let author = normalize_actor(draft.author.take(), fallback);
    draft.into_comment(author)
}
