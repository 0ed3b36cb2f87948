//! Request DTOs with validation.
//!
//! Case create/update bodies deserialize straight into the entity drafts
//! (`CaseDraft`, `CaseUpdate`); only the narrower endpoints get their own
//! types here.

use serde::{Deserialize, Serialize};
use validator::Validate;

use casedesk_entity::case::StoredObject;

/// Append comment request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppendCommentRequest {
    /// Comment text.
    #[validate(length(min = 1, max = 10000, message = "Comment message is required"))]
    pub message: String,
}

/// Append attachments request body: the results of uploads already
/// performed against the object store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppendAttachmentsRequest {
    /// Stored objects to attach.
    #[validate(length(min = 1, message = "At least one uploaded file is required"))]
    pub uploads: Vec<StoredObject>,
}

/// Push endpoint registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterEndpointRequest {
    /// Delivery token issued by the push provider.
    #[validate(length(min = 1, max = 4096, message = "Token is required"))]
    pub token: String,
}
