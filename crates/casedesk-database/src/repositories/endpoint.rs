//! Push endpoint repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use casedesk_core::error::{AppError, ErrorKind};
use casedesk_core::result::AppResult;
use casedesk_core::traits::EndpointDirectory;
use casedesk_core::types::id::{EndpointId, UserId};
use casedesk_entity::endpoint::EndpointRegistration;

/// Endpoint directory backed by the `push_endpoints` table.
#[derive(Debug, Clone)]
pub struct EndpointRepository {
    pool: PgPool,
}

impl EndpointRepository {
    /// Create a new endpoint repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List an owner's registrations in registration order.
    pub async fn find_by_owner(&self, owner: UserId) -> AppResult<Vec<EndpointRegistration>> {
        sqlx::query_as::<_, EndpointRegistration>(
            "SELECT * FROM push_endpoints WHERE owner_id = $1 ORDER BY registered_at, id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list endpoints", e))
    }
}

#[async_trait]
impl EndpointDirectory for EndpointRepository {
    async fn register(&self, owner: UserId, token: &str) -> AppResult<bool> {
        // The WHERE on the conflict arm makes a same-owner re-register a no-op.
        let result = sqlx::query(
            "INSERT INTO push_endpoints (id, owner_id, token) VALUES ($1, $2, $3) \
             ON CONFLICT (token) DO UPDATE \
             SET owner_id = EXCLUDED.owner_id, registered_at = NOW() \
             WHERE push_endpoints.owner_id <> EXCLUDED.owner_id",
        )
        .bind(EndpointId::new())
        .bind(owner)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to register endpoint", e))?;

        let changed = result.rows_affected() > 0;
        debug!(owner = %owner, changed, "Endpoint registration");
        Ok(changed)
    }

    async fn resolve(&self, owner: UserId) -> AppResult<Vec<String>> {
        Ok(self
            .find_by_owner(owner)
            .await?
            .into_iter()
            .map(|r| r.token)
            .collect())
    }

    async fn prune(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM push_endpoints WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to prune endpoint", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn unregister(&self, owner: UserId, token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM push_endpoints WHERE owner_id = $1 AND token = $2")
            .bind(owner)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to unregister endpoint", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
