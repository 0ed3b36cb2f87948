//! Write payloads for case records.
//!
//! [`CaseDraft`] and [`CaseUpdate`] are the caller-facing shapes: they accept
//! polymorphic actor references and assignee emails. [`CaseChanges`] is the
//! normalized form handed to the store.

use serde::{Deserialize, Serialize};

use casedesk_core::AppError;
use casedesk_core::result::AppResult;
use casedesk_core::types::id::UserId;

use super::actor::{ActorRef, NormalizedActor, deserialize_optional};
use super::attachment::{Attachment, AttachmentDraft, StoredObject};
use super::comment::{Comment, CommentDraft};
use super::status::CaseStatus;

type Details = serde_json::Map<String, serde_json::Value>;

/// Payload for creating a case.
///
/// There is no `serial` field: the serial is always allocated server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseDraft {
    /// Case title.
    #[serde(default)]
    pub subject: String,
    /// Initial status; defaults to `pending`.
    #[serde(default)]
    pub status: Option<CaseStatus>,
    /// Department the case is routed to.
    #[serde(default)]
    pub assigned_department: Option<String>,
    /// Assignee emails, resolved through the user directory.
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Creator; defaults to the request actor.
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub created_by: Option<ActorRef>,
    /// Initial comments.
    #[serde(default)]
    pub comments: Vec<CommentDraft>,
    /// Files already placed in object storage.
    #[serde(default)]
    pub uploads: Vec<StoredObject>,
    /// Opaque domain fields.
    #[serde(default)]
    pub details: Details,
}

impl CaseDraft {
    /// Check required fields.
    pub fn validate(&self) -> AppResult<()> {
        if self.subject.trim().is_empty() {
            return Err(AppError::validation("Case subject is required"));
        }
        validate_comments(&self.comments)
    }

    /// The department with surrounding whitespace removed; blank is `None`.
    pub fn department(&self) -> Option<String> {
        normalize_department(self.assigned_department.as_deref())
    }
}

/// Payload for updating a case.
///
/// Unknown fields are rejected, so a `serial` key can never reach the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseUpdate {
    /// New title.
    #[serde(default)]
    pub subject: Option<String>,
    /// New status.
    #[serde(default)]
    pub status: Option<CaseStatus>,
    /// New department; an empty string clears it.
    #[serde(default)]
    pub assigned_department: Option<String>,
    /// Replacement assignee emails.
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
    /// New creator attribution.
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub created_by: Option<ActorRef>,
    /// Comments; only ids not yet stored are appended.
    #[serde(default)]
    pub comments: Vec<CommentDraft>,
    /// Client-side attachment list, merged with `uploads`.
    #[serde(default)]
    pub attachments: Vec<AttachmentDraft>,
    /// Files uploaded with this update.
    #[serde(default)]
    pub uploads: Vec<StoredObject>,
    /// Domain fields to overwrite, key by key.
    #[serde(default)]
    pub details: Option<Details>,
}

impl CaseUpdate {
    /// Check field shapes.
    pub fn validate(&self) -> AppResult<()> {
        if self.subject.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(AppError::validation("Case subject cannot be blank"));
        }
        validate_comments(&self.comments)
    }

    /// `Some(None)` clears the department, `None` leaves it untouched.
    pub fn department(&self) -> Option<Option<String>> {
        self.assigned_department
            .as_deref()
            .map(|d| normalize_department(Some(d)))
    }
}

/// Normalized change set applied by the store in one write.
#[derive(Debug, Clone, Default)]
pub struct CaseChanges {
    /// New title.
    pub subject: Option<String>,
    /// New status.
    pub status: Option<CaseStatus>,
    /// `Some(None)` clears the department.
    pub assigned_department: Option<Option<String>>,
    /// Replacement assignees.
    pub assignees: Option<Vec<UserId>>,
    /// New creator attribution.
    pub created_by: Option<NormalizedActor>,
    /// Top-level keys merged into `details`.
    pub details: Option<Details>,
    /// Comments to append.
    pub new_comments: Vec<Comment>,
    /// Attachments to append.
    pub new_attachments: Vec<Attachment>,
}

impl CaseChanges {
    /// Whether applying this change set would alter nothing but `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.status.is_none()
            && self.assigned_department.is_none()
            && self.assignees.is_none()
            && self.created_by.is_none()
            && self.details.is_none()
            && self.new_comments.is_empty()
            && self.new_attachments.is_empty()
    }
}

fn normalize_department(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

fn validate_comments(comments: &[CommentDraft]) -> AppResult<()> {
    if comments.iter().any(|c| c.message.trim().is_empty()) {
        return Err(AppError::validation("Comment message cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_rejects_serial() {
        let result: Result<CaseUpdate, _> = serde_json::from_value(json!({ "serial": 99 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_requires_subject() {
        let draft: CaseDraft = serde_json::from_value(json!({ "subject": "  " })).unwrap();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_details_must_be_object() {
        let result: Result<CaseDraft, _> =
            serde_json::from_value(json!({ "subject": "x", "details": [1, 2] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_department_clearing() {
        let update: CaseUpdate =
            serde_json::from_value(json!({ "assigned_department": "" })).unwrap();
        assert_eq!(update.department(), Some(None));

        let update: CaseUpdate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(update.department(), None);
    }

    #[test]
    fn test_empty_changes() {
        assert!(CaseChanges::default().is_empty());
        let changes = CaseChanges {
            status: Some(CaseStatus::Ongoing),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
