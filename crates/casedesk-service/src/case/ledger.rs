//! Comment ledger and attachment registry.
//!
//! Both collections are append-only and each append is a single atomic
//! write in the store. There is no edit or delete.

use std::collections::HashSet;

use tracing::info;

use casedesk_core::AppError;
use casedesk_core::result::AppResult;
use casedesk_core::types::id::CaseId;
use casedesk_entity::case::attachment::merge_attachments;
use casedesk_entity::case::{ActorRef, Attachment, Comment, StoredObject};

use crate::context::RequestContext;

use super::service::CaseService;

impl CaseService {
    /// Append a comment by the request actor and return the full ordered
    /// comment list.
    pub async fn append_comment(
        &self,
        ctx: &RequestContext,
        case_id: CaseId,
        message: &str,
    ) -> AppResult<Vec<Comment>> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::validation("Comment message cannot be empty"));
        }

        let comment = Comment::new(message, ctx.actor());
        let comments = self
            .store
            .append_comments(case_id, std::slice::from_ref(&comment))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {case_id} not found")))?;

        info!(case_id = %case_id, comment_id = %comment.id, actor = %ctx.user_id, "Comment appended");

        Ok(comments)
    }

    /// Record freshly uploaded objects as attachments by the request actor
    /// and return the full ordered attachment list.
    ///
    /// Objects whose provider id is already stored on the case are skipped.
    pub async fn append_attachments(
        &self,
        ctx: &RequestContext,
        case_id: CaseId,
        uploads: Vec<StoredObject>,
    ) -> AppResult<Vec<Attachment>> {
        if uploads.is_empty() {
            return Err(AppError::validation("At least one uploaded file is required"));
        }
        if uploads.iter().any(|o| o.provider_id.trim().is_empty()) {
            return Err(AppError::validation("Uploaded file is missing its provider id"));
        }

        let uploader = ActorRef::from(ctx.actor());
        let drafts = uploads
            .into_iter()
            .map(|o| o.into_draft(Some(uploader.clone())))
            .collect();
        let incoming = merge_attachments(Vec::new(), drafts, &HashSet::new());

        let attachments = self
            .store
            .append_attachments(case_id, &incoming)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Case {case_id} not found")))?;

        info!(
            case_id = %case_id,
            incoming = incoming.len(),
            total = attachments.len(),
            actor = %ctx.user_id,
            "Attachments appended"
        );

        Ok(attachments)
    }
}
