//! Actor references as they arrive from callers.
//!
//! Clients send "who did this" either as a bare user id or as an inline
//! object carrying the id and the email. [`ActorRef`] accepts both shapes;
//! it is normalized once into a [`NormalizedActor`] and never persisted as
//! the union.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use casedesk_core::types::id::UserId;

/// A caller-supplied reference to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActorRef {
    /// A bare user identifier.
    Id(UserId),
    /// An inline user object.
    Inline {
        /// The user's identifier.
        #[serde(alias = "_id")]
        id: UserId,
        /// The user's email, kept for display.
        #[serde(default)]
        email: Option<String>,
    },
}

/// The stored shape of an actor: the identifier plus an optional sibling
/// email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedActor {
    /// The user's identifier.
    pub id: UserId,
    /// The user's email, if known.
    pub email: Option<String>,
}

impl ActorRef {
    /// The referenced user's identifier.
    pub fn id(&self) -> UserId {
        match self {
            Self::Id(id) | Self::Inline { id, .. } => *id,
        }
    }

    /// Collapse either shape into the stored shape.
    ///
    /// Blank emails are treated as absent.
    pub fn normalize(self) -> NormalizedActor {
        match self {
            Self::Id(id) => NormalizedActor { id, email: None },
            Self::Inline { id, email } => NormalizedActor {
                id,
                email: email
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty()),
            },
        }
    }
}

impl NormalizedActor {
    /// Build a normalized actor from its parts.
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// Fill in a missing email from `fallback` when it refers to the same user.
    pub fn or_email_of(mut self, fallback: &NormalizedActor) -> Self {
        if self.email.is_none() && self.id == fallback.id {
            self.email = fallback.email.clone();
        }
        self
    }
}

impl From<NormalizedActor> for ActorRef {
    fn from(actor: NormalizedActor) -> Self {
        match actor.email {
            Some(email) => Self::Inline {
                id: actor.id,
                email: Some(email),
            },
            None => Self::Id(actor.id),
        }
    }
}

/// Deserialize an optional actor, mapping `null` and `""` to `None`.
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<ActorRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(D::Error::custom),
    }
}
