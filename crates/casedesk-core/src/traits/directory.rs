//! Read-only view of the external user directory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::id::UserId;

/// A directory member as seen by the notification fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// The user's identifier.
    pub user_id: UserId,
    /// The user's email address.
    pub email: String,
}

/// Lookups against the user directory.
///
/// The directory is owned by another part of the system; this engine
/// only reads from it.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Resolve an email address (case-insensitive) to a user.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserId>>;

    /// List every user whose department equals `department`.
    async fn find_by_department(&self, department: &str) -> AppResult<Vec<DirectoryEntry>>;
}
