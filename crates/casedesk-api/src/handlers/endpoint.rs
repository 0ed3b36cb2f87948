//! Push endpoint registration handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::RegisterEndpointRequest;
use crate::dto::response::{ApiResponse, MessageResponse, RegisterEndpointResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/endpoints
pub async fn register_endpoint(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RegisterEndpointRequest>,
) -> Result<Json<ApiResponse<RegisterEndpointResponse>>, ApiError> {
    let changed = state.endpoint_service.register(&auth, &req.token).await?;
    Ok(Json(ApiResponse::ok(RegisterEndpointResponse { changed })))
}

/// DELETE /api/endpoints/{token}
pub async fn unregister_endpoint(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.endpoint_service.unregister(&auth, &token).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Endpoint removed".to_string(),
    })))
}
