//! In-memory user directory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use casedesk_core::result::AppResult;
use casedesk_core::traits::{DirectoryEntry, UserDirectory};
use casedesk_core::types::id::UserId;
use casedesk_entity::user::User;

/// User directory seeded from a fixed list of users.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserDirectory {
    /// Create a directory containing `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Add a user.
    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserId>> {
        let wanted = email.trim();
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(wanted))
            .map(|u| u.id))
    }

    async fn find_by_department(&self, department: &str) -> AppResult<Vec<DirectoryEntry>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.in_department(department))
            .map(|u| DirectoryEntry {
                user_id: u.id,
                email: u.email.clone(),
            })
            .collect())
    }
}
