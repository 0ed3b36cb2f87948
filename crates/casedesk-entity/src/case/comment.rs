//! Case comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casedesk_core::types::id::{CommentId, UserId};

use super::actor::{ActorRef, NormalizedActor, deserialize_optional};

/// A comment embedded in a case record. Comments are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    pub id: CommentId,
    /// Comment text.
    pub message: String,
    /// The commenting user.
    pub author: UserId,
    /// The author's email, denormalized for display.
    #[serde(default)]
    pub author_email: Option<String>,
    /// When the comment was made.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment by `author`, stamped with the current time.
    pub fn new(message: impl Into<String>, author: NormalizedActor) -> Self {
        Self {
            id: CommentId::new(),
            message: message.into(),
            author: author.id,
            author_email: author.email,
            created_at: Utc::now(),
        }
    }
}

/// A comment as supplied in a create or update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDraft {
    /// Existing comment id; `None` for a new comment.
    #[serde(default)]
    pub id: Option<CommentId>,
    /// Comment text.
    pub message: String,
    /// The author; defaults to the request actor when absent.
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub author: Option<ActorRef>,
    /// Original timestamp, if the client carries one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentDraft {
    /// Turn the draft into a stored comment attributed to `author`.
    pub fn into_comment(self, author: NormalizedActor) -> Comment {
        Comment {
            id: self.id.unwrap_or_default(),
            message: self.message.trim().to_string(),
            author: author.id,
            author_email: author.email,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}
