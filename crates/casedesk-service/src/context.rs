//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casedesk_core::types::id::UserId;
use casedesk_entity::case::NormalizedActor;
use casedesk_entity::user::UserRole;

/// Context for the current request.
///
/// Built by the API layer from the identity headers set by the upstream
/// authentication proxy and passed into every service method, so each
/// operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's email, when the proxy supplies it.
    pub email: Option<String>,
    /// The acting user's role.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, email: Option<String>, role: UserRole) -> Self {
        Self {
            user_id,
            email: email.filter(|e| !e.trim().is_empty()),
            role,
            request_time: Utc::now(),
        }
    }

    /// The acting user in stored actor form.
    pub fn actor(&self) -> NormalizedActor {
        NormalizedActor::new(self.user_id, self.email.clone())
    }

    /// Returns whether the acting user holds the top-level administrative role.
    pub fn is_top_level(&self) -> bool {
        self.role.is_top_level()
    }
}
