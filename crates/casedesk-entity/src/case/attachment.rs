//! Case attachments and the object-storage result shape.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casedesk_core::types::id::{AttachmentId, UserId};

use super::actor::{ActorRef, deserialize_optional};

/// Pointer into the external object store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageRef {
    /// Provider-side object identifier; the dedup key for attachments.
    pub provider_id: String,
    /// Retrieval URL.
    pub url: String,
}

/// An attachment embedded in a case record. Attachments are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment identifier.
    pub id: AttachmentId,
    /// Original file name.
    pub file_name: String,
    /// Where the bytes live.
    pub storage_ref: StorageRef,
    /// The uploading user.
    pub uploaded_by: UserId,
    /// When the attachment was recorded.
    pub uploaded_at: DateTime<Utc>,
}

/// Result of one upload to the object store, as returned by the storage
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Provider-side object identifier.
    pub provider_id: String,
    /// Retrieval URL.
    pub secure_url: String,
    /// File name as uploaded.
    pub original_filename: String,
}

impl StoredObject {
    /// Build an attachment draft for this object, attributed to `uploader`.
    pub fn into_draft(self, uploader: Option<ActorRef>) -> AttachmentDraft {
        AttachmentDraft {
            id: None,
            file_name: self.original_filename,
            storage_ref: StorageRef {
                provider_id: self.provider_id,
                url: self.secure_url,
            },
            uploaded_by: uploader,
            uploaded_at: None,
        }
    }
}

/// An attachment as supplied in an update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentDraft {
    /// Existing attachment id, if any.
    #[serde(default)]
    pub id: Option<AttachmentId>,
    /// Original file name.
    pub file_name: String,
    /// Where the bytes live.
    pub storage_ref: StorageRef,
    /// The uploading user; may be missing on client-supplied entries.
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub uploaded_by: Option<ActorRef>,
    /// Original timestamp, if the client carries one.
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl AttachmentDraft {
    /// Turn the draft into a stored attachment, or `None` if it has no
    /// attributable uploader.
    pub fn into_attachment(self) -> Option<Attachment> {
        let uploaded_by = self.uploaded_by?.id();
        Some(Attachment {
            id: self.id.unwrap_or_default(),
            file_name: self.file_name,
            storage_ref: self.storage_ref,
            uploaded_by,
            uploaded_at: self.uploaded_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Merge payload attachments with a freshly uploaded batch.
///
/// Entries are keyed by `storage_ref.provider_id`. On a duplicate key the
/// entry with an uploader wins over one without (first wins otherwise).
/// Entries left without an uploader are dropped, as are entries whose key is
/// already in `existing`. First-seen key order is preserved.
pub fn merge_attachments(
    payload: Vec<AttachmentDraft>,
    uploaded: Vec<AttachmentDraft>,
    existing: &HashSet<String>,
) -> Vec<Attachment> {
    let mut order: Vec<String> = Vec::new();
    let mut by_key: BTreeMap<String, AttachmentDraft> = BTreeMap::new();

    for draft in payload.into_iter().chain(uploaded) {
        let key = draft.storage_ref.provider_id.clone();
        match by_key.get(&key) {
            None => {
                order.push(key.clone());
                by_key.insert(key, draft);
            }
            Some(current) if current.uploaded_by.is_none() && draft.uploaded_by.is_some() => {
                by_key.insert(key, draft);
            }
            Some(_) => {}
        }
    }

    order
        .into_iter()
        .filter(|key| !existing.contains(key))
        .filter_map(|key| by_key.remove(&key))
        .filter_map(AttachmentDraft::into_attachment)
        .collect()
}
