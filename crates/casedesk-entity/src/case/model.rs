//! Case record entity model.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use casedesk_core::types::id::{CaseId, CommentId, UserId};

use super::attachment::Attachment;
use super::comment::Comment;
use super::draft::CaseChanges;
use super::status::CaseStatus;

/// The case-record aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaseRecord {
    /// Opaque identity.
    pub id: CaseId,
    /// Human-facing sequence number, assigned once at creation.
    pub serial: i64,
    /// Short title used in listings and notifications.
    pub subject: String,
    /// Workflow status.
    pub status: CaseStatus,
    /// Department the case is routed to.
    pub assigned_department: Option<String>,
    /// Users assigned to the case.
    pub assignees: Vec<UserId>,
    /// The creating user.
    pub created_by: UserId,
    /// The creator's email, denormalized for display.
    pub created_by_email: Option<String>,
    /// Comments in append order.
    #[sqlx(json)]
    pub comments: Vec<Comment>,
    /// Attachments in append order.
    #[sqlx(json)]
    pub attachments: Vec<Attachment>,
    /// Opaque domain fields (dates, amounts, free text).
    #[sqlx(json)]
    pub details: serde_json::Map<String, serde_json::Value>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl CaseRecord {
    /// Whether the record already holds a comment with this id.
    pub fn has_comment(&self, id: &CommentId) -> bool {
        self.comments.iter().any(|c| &c.id == id)
    }

    /// Provider ids of every stored attachment.
    pub fn attachment_keys(&self) -> HashSet<String> {
        self.attachments
            .iter()
            .map(|a| a.storage_ref.provider_id.clone())
            .collect()
    }

    /// Apply a normalized change set in place.
    ///
    /// Scalars are overwritten, `details` keys are merged at the top level
    /// and comments/attachments are appended. Nothing is ever removed from
    /// the embedded collections.
    pub fn apply(&mut self, changes: CaseChanges) {
        if let Some(subject) = changes.subject {
            self.subject = subject;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(department) = changes.assigned_department {
            self.assigned_department = department;
        }
        if let Some(assignees) = changes.assignees {
            self.assignees = assignees;
        }
        if let Some(creator) = changes.created_by {
            self.created_by = creator.id;
            self.created_by_email = creator.email;
        }
        if let Some(details) = changes.details {
            self.details.extend(details);
        }
        self.comments.extend(changes.new_comments);
        self.attachments.extend(changes.new_attachments);
        self.updated_at = Utc::now();
    }
}
