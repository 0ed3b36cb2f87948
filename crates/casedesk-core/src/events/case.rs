//! Case-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::id::{CaseId, UserId};

/// Events related to case record operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CaseEvent {
    /// A case record was created and persisted.
    Created {
        /// The case ID.
        case_id: CaseId,
        /// The serial assigned at creation.
        serial: i64,
        /// The case subject.
        subject: String,
        /// The department the case was assigned to (if any).
        assigned_department: Option<String>,
        /// The user recorded as the case creator (may be filed on their behalf).
        created_by: UserId,
        /// The user who performed the creation.
        actor: UserId,
        /// The acting user's role at the time of creation.
        creator_role: String,
    },
}

impl CaseEvent {
    /// Stable event type name used for handler routing.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Created { .. } => "case.created",
        }
    }
}
