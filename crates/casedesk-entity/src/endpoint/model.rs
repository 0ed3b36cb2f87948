//! Endpoint registration entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use casedesk_core::types::id::{EndpointId, UserId};

/// One push-delivery token registered by a client device or browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EndpointRegistration {
    /// Registration identifier.
    pub id: EndpointId,
    /// The user the token delivers to.
    pub owner_id: UserId,
    /// Opaque gateway token, unique across the directory.
    pub token: String,
    /// When the token was (last) registered.
    pub registered_at: DateTime<Utc>,
}

impl EndpointRegistration {
    /// Create a fresh registration stamped with the current time.
    pub fn new(owner_id: UserId, token: impl Into<String>) -> Self {
        Self {
            id: EndpointId::new(),
            owner_id,
            token: token.into(),
            registered_at: Utc::now(),
        }
    }
}
