//! Case-record repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use casedesk_core::error::{AppError, ErrorKind};
use casedesk_core::result::AppResult;
use casedesk_core::types::id::CaseId;
use casedesk_entity::case::{Attachment, CaseChanges, CaseRecord, Comment};

use crate::connection::is_unique_violation;
use crate::store::CaseStore;

/// Case store backed by the `cases` table.
///
/// Comments, attachments and details live in `jsonb` columns; appends use
/// the `||` operator inside a single `UPDATE` so the row lock serializes
/// concurrent writers.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    /// Create a new case repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaseStore for CaseRepository {
    async fn insert(&self, record: &CaseRecord) -> AppResult<CaseRecord> {
        sqlx::query_as::<_, CaseRecord>(
            "INSERT INTO cases (id, serial, subject, status, assigned_department, assignees, \
             created_by, created_by_email, comments, attachments, details, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(record.id)
        .bind(record.serial)
        .bind(&record.subject)
        .bind(record.status)
        .bind(&record.assigned_department)
        .bind(&record.assignees)
        .bind(record.created_by)
        .bind(&record.created_by_email)
        .bind(Json(&record.comments))
        .bind(Json(&record.attachments))
        .bind(Json(&record.details))
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::with_source(
                    ErrorKind::Conflict,
                    format!("Case serial {} is already taken", record.serial),
                    e,
                )
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert case", e)
            }
        })
    }

    async fn find_by_id(&self, id: CaseId) -> AppResult<Option<CaseRecord>> {
        sqlx::query_as::<_, CaseRecord>("SELECT * FROM cases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find case", e))
    }

    async fn apply_changes(
        &self,
        id: CaseId,
        changes: &CaseChanges,
    ) -> AppResult<Option<CaseRecord>> {
        let clear_or_set_department = changes.assigned_department.is_some();
        let department = changes.assigned_department.clone().flatten();
        let creator = changes.created_by.as_ref();

        sqlx::query_as::<_, CaseRecord>(
            "UPDATE cases SET \
               subject = COALESCE($2, subject), \
               status = COALESCE($3, status), \
               assigned_department = CASE WHEN $4 THEN $5 ELSE assigned_department END, \
               assignees = COALESCE($6, assignees), \
               created_by = COALESCE($7, created_by), \
               created_by_email = CASE WHEN $7 IS NULL THEN created_by_email ELSE $8 END, \
               details = details || COALESCE($9, '{}'::jsonb), \
               comments = comments || $10, \
               attachments = attachments || $11, \
               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.subject)
        .bind(changes.status)
        .bind(clear_or_set_department)
        .bind(department)
        .bind(&changes.assignees)
        .bind(creator.map(|c| c.id))
        .bind(creator.and_then(|c| c.email.clone()))
        .bind(changes.details.as_ref().map(Json))
        .bind(Json(&changes.new_comments))
        .bind(Json(&changes.new_attachments))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update case", e))
    }

    async fn append_comments(
        &self,
        id: CaseId,
        comments: &[Comment],
    ) -> AppResult<Option<Vec<Comment>>> {
        let stored: Option<Json<Vec<Comment>>> = sqlx::query_scalar(
            "UPDATE cases SET comments = comments || $2, updated_at = NOW() \
             WHERE id = $1 RETURNING comments",
        )
        .bind(id)
        .bind(Json(comments))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append comment", e))?;

        Ok(stored.map(|Json(list)| list))
    }

    async fn append_attachments(
        &self,
        id: CaseId,
        attachments: &[Attachment],
    ) -> AppResult<Option<Vec<Attachment>>> {
        // Filter against the row being updated so the key check and the
        // append happen under the same row lock.
        let stored: Option<Json<Vec<Attachment>>> = sqlx::query_scalar(
            "UPDATE cases SET attachments = attachments || COALESCE(( \
                 SELECT jsonb_agg(incoming.item ORDER BY incoming.ord) \
                 FROM jsonb_array_elements($2) WITH ORDINALITY AS incoming(item, ord) \
                 WHERE NOT EXISTS ( \
                     SELECT 1 FROM jsonb_array_elements(cases.attachments) AS present(item) \
                     WHERE present.item -> 'storage_ref' ->> 'provider_id' \
                         = incoming.item -> 'storage_ref' ->> 'provider_id' \
                 ) \
             ), '[]'::jsonb), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING attachments",
        )
        .bind(id)
        .bind(Json(attachments))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to append attachments", e)
        })?;

        Ok(stored.map(|Json(list)| list))
    }
}
