//! Per-request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use casedesk_core::error::AppError;

use crate::error::ApiError;

/// Fails the request with 503 when the handler runs past `limit`.
pub async fn enforce_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    tokio::time::timeout(limit, next.run(request))
        .await
        .map_err(|_| {
            ApiError::from(AppError::service_unavailable(format!(
                "Request to {path} timed out after {}s",
                limit.as_secs()
            )))
        })
}
