//! `AuthUser` extractor: reads the identity headers set by the upstream
//! authentication proxy and builds a `RequestContext`.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use casedesk_core::error::AppError;

use crate::error::ApiError;
use casedesk_core::types::id::UserId;
use casedesk_entity::user::UserRole;
use casedesk_service::context::RequestContext;

use crate::state::AppState;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the acting user's email.
pub const USER_EMAIL_HEADER: &str = "x-user-email";
/// Header carrying the acting user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = context_from_headers(&parts.headers)?;
        Ok(AuthUser(ctx))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Build a request context from the identity headers.
///
/// A missing role header means `member`; an unknown role is rejected.
pub fn context_from_headers(headers: &HeaderMap) -> Result<RequestContext, AppError> {
    let user_id = header_str(headers, USER_ID_HEADER)
        .ok_or_else(|| AppError::authentication("Missing x-user-id header"))?
        .parse::<UserId>()
        .map_err(|_| AppError::authentication("Invalid x-user-id header"))?;

    let email = header_str(headers, USER_EMAIL_HEADER).map(String::from);

    let role = match header_str(headers, USER_ROLE_HEADER) {
        Some(raw) => raw
            .parse::<UserRole>()
            .map_err(|_| AppError::authentication(format!("Invalid x-user-role header: '{raw}'")))?,
        None => UserRole::Member,
    };

    Ok(RequestContext::new(user_id, email, role))
}
