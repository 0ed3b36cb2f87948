//! Publication of domain events to the background worker.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use casedesk_core::events::{CaseEvent, DomainEvent, EventPayload};
use casedesk_core::types::id::UserId;

/// Sends case events to the in-process event channel.
///
/// Publication is best-effort: a full or closed channel drops the event
/// with a warning and never fails the write that produced it.
#[derive(Debug, Clone, Default)]
pub struct CaseEventPublisher {
    sender: Option<mpsc::Sender<DomainEvent>>,
}

impl CaseEventPublisher {
    /// Publish into `sender`.
    pub fn new(sender: mpsc::Sender<DomainEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// A publisher that discards every event.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Publish a case event caused by `actor`.
    pub fn publish(&self, actor: Option<UserId>, event: CaseEvent) {
        let Some(sender) = &self.sender else {
            return;
        };

        let event = DomainEvent::new(actor, EventPayload::Case(event));
        let event_type = event.event_type();
        match sender.try_send(event) {
            Ok(()) => debug!(event_type, "Published domain event"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(event_type, "Event channel full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(event_type, "Event channel closed, dropping event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedesk_core::types::id::{CaseId, UserId};

    fn event() -> CaseEvent {
        let actor = UserId::new();
        CaseEvent::Created {
            case_id: CaseId::new(),
            serial: 7,
            subject: "Badge reader offline".into(),
            assigned_department: Some("Facilities".into()),
            created_by: actor,
            actor,
            creator_role: "super_admin".into(),
        }
    }

    #[tokio::test]
    async fn test_publish_delivers_to_channel() {
        let (tx, mut rx) = mpsc::channel(4);
        let publisher = CaseEventPublisher::new(tx);
        publisher.publish(None, event());

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event_type(), "case.created");
    }

    #[tokio::test]
    async fn test_full_channel_drops_without_panicking() {
        let (tx, mut rx) = mpsc::channel(1);
        let publisher = CaseEventPublisher::new(tx);
        publisher.publish(None, event());
        publisher.publish(None, event());

        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_err());
    }
}
