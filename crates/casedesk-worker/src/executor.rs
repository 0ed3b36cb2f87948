//! Event executor: routes domain events to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing;

use casedesk_core::error::AppError;
use casedesk_core::events::DomainEvent;

/// A handler for one domain event type.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The event type this handler processes (`"case.created"`, ...).
    fn event_type(&self) -> &str;

    /// Handle one event.
    async fn handle(&self, event: &DomainEvent) -> Result<(), EventHandlingError>;
}

/// Failure while handling an event.
#[derive(Debug, thiserror::Error)]
pub enum EventHandlingError {
    /// The event cannot be handled as delivered.
    #[error("Event rejected: {0}")]
    Rejected(String),

    /// A collaborator failed; the event is dropped after logging.
    #[error("Transient event failure: {0}")]
    Transient(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Routes events to the handler registered for their type.
#[derive(Default)]
pub struct EventExecutor {
    handlers: HashMap<String, Arc<dyn EventHandler>>,
}

impl EventExecutor {
    /// Create an executor with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the same type.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        let event_type = handler.event_type().to_string();
        tracing::info!(event_type = %event_type, "Registered event handler");
        self.handlers.insert(event_type, handler);
    }

    /// Handle `event`. Returns `false` when no handler is registered for it.
    pub async fn execute(&self, event: &DomainEvent) -> Result<bool, EventHandlingError> {
        let Some(handler) = self.handlers.get(event.event_type()) else {
            tracing::trace!(event_type = event.event_type(), "No handler for event");
            return Ok(false);
        };

        tracing::debug!(event_id = %event.id, event_type = event.event_type(), "Handling event");
        handler.handle(event).await?;
        Ok(true)
    }

    /// Check if a handler is registered for an event type
    pub fn has_handler(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Registered event types.
    pub fn registered_types(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}
