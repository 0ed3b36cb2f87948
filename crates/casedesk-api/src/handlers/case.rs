//! Case record, comment and attachment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use casedesk_core::types::id::CaseId;
use casedesk_entity::case::{Attachment, CaseDraft, CaseRecord, CaseUpdate, Comment};

use crate::dto::request::{AppendAttachmentsRequest, AppendCommentRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

/// POST /api/cases
pub async fn create_case(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(draft): ApiJson<CaseDraft>,
) -> Result<(StatusCode, Json<ApiResponse<CaseRecord>>), ApiError> {
    let record = state.case_service.create(&auth, draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// GET /api/cases/{id}
pub async fn get_case(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CaseRecord>>, ApiError> {
    let id: CaseId = parse_id(&id)?;
    let record = state.case_service.get(id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// PUT /api/cases/{id}
pub async fn update_case(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<CaseUpdate>,
) -> Result<Json<ApiResponse<CaseRecord>>, ApiError> {
    let id: CaseId = parse_id(&id)?;
    let record = state.case_service.update(&auth, id, update).await?;
    Ok(Json(ApiResponse::ok(record)))
}

/// POST /api/cases/{id}/comments
pub async fn append_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<AppendCommentRequest>,
) -> Result<Json<ApiResponse<Vec<Comment>>>, ApiError> {
    let id: CaseId = parse_id(&id)?;
    let comments = state
        .case_service
        .append_comment(&auth, id, &req.message)
        .await?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// POST /api/cases/{id}/attachments
pub async fn append_attachments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<AppendAttachmentsRequest>,
) -> Result<Json<ApiResponse<Vec<Attachment>>>, ApiError> {
    let id: CaseId = parse_id(&id)?;
    let attachments = state
        .case_service
        .append_attachments(&auth, id, req.uploads)
        .await?;
    Ok(Json(ApiResponse::ok(attachments)))
}
