//! Value types exchanged with the push-delivery gateway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single multicast request to the push gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Endpoint tokens to deliver to.
    pub tokens: Vec<String>,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// String-only data payload delivered alongside the notification.
    pub data: BTreeMap<String, String>,
    /// URL opened when the notification is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_target: Option<String>,
}

/// Per-token delivery classification reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The message was accepted for this token.
    Delivered,
    /// The token is permanently dead and should be pruned.
    InvalidToken,
    /// A transient failure; the token stays registered.
    Transient,
}

/// Outcome of delivering a multicast message to one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// The token this outcome applies to.
    pub token: String,
    /// The delivery classification.
    pub status: DeliveryStatus,
}

impl DeliveryOutcome {
    /// Build a successful outcome.
    pub fn delivered(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            status: DeliveryStatus::Delivered,
        }
    }

    /// Build an invalid-token outcome.
    pub fn invalid(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            status: DeliveryStatus::InvalidToken,
        }
    }

    /// Build a transient-failure outcome.
    pub fn transient(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            status: DeliveryStatus::Transient,
        }
    }

    /// Whether the delivery succeeded.
    pub fn is_success(&self) -> bool {
        self.status == DeliveryStatus::Delivered
    }
}
