//! User directory repository.

use async_trait::async_trait;
use sqlx::PgPool;

use casedesk_core::error::{AppError, ErrorKind};
use casedesk_core::result::AppResult;
use casedesk_core::traits::{DirectoryEntry, UserDirectory};
use casedesk_core::types::id::UserId;
use casedesk_entity::user::User;

/// Read-only access to the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// List the members of a department, oldest account first.
    pub async fn list_department(&self, department: &str) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE department = $1 ORDER BY created_at, id",
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list department members", e)
        })
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserId>> {
        sqlx::query_scalar("SELECT id FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to look up user by email", e)
            })
    }

    async fn find_by_department(&self, department: &str) -> AppResult<Vec<DirectoryEntry>> {
        Ok(self
            .list_department(department)
            .await?
            .into_iter()
            .map(|u| DirectoryEntry {
                user_id: u.id,
                email: u.email,
            })
            .collect())
    }
}
