//! PostgreSQL serial allocator.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use casedesk_core::error::{AppError, ErrorKind};
use casedesk_core::result::AppResult;
use casedesk_core::traits::SerialAllocator;

/// Serial allocator backed by the `serial_counters` table.
///
/// Each allocation is one upsert-increment statement, so the row lock taken
/// by the update serializes concurrent callers inside PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgSerialAllocator {
    pool: PgPool,
}

impl PgSerialAllocator {
    /// Create a new allocator.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SerialAllocator for PgSerialAllocator {
    async fn next(&self, sequence: &str) -> AppResult<i64> {
        let value: i64 = sqlx::query_scalar(
            "INSERT INTO serial_counters (name, value) VALUES ($1, 1) \
             ON CONFLICT (name) DO UPDATE SET value = serial_counters.value + 1 \
             RETURNING value",
        )
        .bind(sequence)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Allocator,
                format!("Failed to allocate from sequence '{sequence}'"),
                e,
            )
        })?;

        debug!(sequence = %sequence, value, "Allocated serial");
        Ok(value)
    }

    async fn current(&self, sequence: &str) -> AppResult<Option<i64>> {
        sqlx::query_scalar("SELECT value FROM serial_counters WHERE name = $1")
            .bind(sequence)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Allocator, "Failed to read sequence", e)
            })
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1 FROM serial_counters LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .map(|_| true)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Allocator, "Serial counter table unreachable", e)
            })
    }
}
