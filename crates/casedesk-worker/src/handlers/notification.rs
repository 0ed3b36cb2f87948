//! Creation notification handler.

use async_trait::async_trait;
use tracing;

use casedesk_core::error::ErrorKind;
use casedesk_core::events::{DomainEvent, EventPayload};
use casedesk_service::notification::CreationNotifier;

use crate::executor::{EventHandler, EventHandlingError};

/// Runs the creation notifier for every `case.created` event.
pub struct CaseCreatedNotificationHandler {
    notifier: CreationNotifier,
}

impl CaseCreatedNotificationHandler {
    /// Create a new handler
    pub fn new(notifier: CreationNotifier) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl EventHandler for CaseCreatedNotificationHandler {
    fn event_type(&self) -> &str {
        "case.created"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), EventHandlingError> {
        let EventPayload::Case(case_event) = &event.payload;

        match self.notifier.on_case_event(case_event).await {
            Ok(Some(report)) => {
                tracing::debug!(
                    event_id = %event.id,
                    success_count = report.success_count,
                    "Creation notification handled"
                );
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) if e.is(ErrorKind::Database) || e.is(ErrorKind::ExternalService) => {
                Err(EventHandlingError::Transient(e.to_string()))
            }
            Err(e) => Err(EventHandlingError::Internal(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use casedesk_core::events::CaseEvent;
    use casedesk_core::result::AppResult;
    use casedesk_core::traits::{EndpointDirectory, PushGateway};
    use casedesk_core::types::id::{CaseId, UserId};
    use casedesk_core::types::push::{DeliveryOutcome, PushMessage};
    use casedesk_database::memory::{MemoryEndpointDirectory, MemoryUserDirectory};
    use casedesk_entity::user::{User, UserRole};
    use casedesk_service::notification::{
        NotificationDispatcher, NotificationFormatter, NotificationRules,
    };

    #[derive(Default)]
    struct CountingGateway(AtomicUsize);

    #[async_trait]
    impl PushGateway for CountingGateway {
        async fn send_multicast(&self, message: &PushMessage) -> AppResult<Vec<DeliveryOutcome>> {
            self.0.fetch_add(message.tokens.len(), Ordering::SeqCst);
            Ok(message.tokens.iter().map(DeliveryOutcome::delivered).collect())
        }
    }

    #[tokio::test]
    async fn test_created_event_reaches_gateway() {
        let member = User {
            id: UserId::new(),
            email: "u1@x.com".into(),
            display_name: None,
            role: UserRole::Member,
            department: Some("Legal".into()),
            created_at: chrono::Utc::now(),
        };
        let endpoints = Arc::new(MemoryEndpointDirectory::new());
        endpoints.register(member.id, "t1").await.unwrap();

        let gateway = Arc::new(CountingGateway::default());
        let notifier = CreationNotifier::new(
            NotificationRules::new(Arc::new(MemoryUserDirectory::with_users(vec![member]))),
            NotificationDispatcher::new(
                gateway.clone(),
                endpoints,
                500,
                Duration::from_secs(1),
            ),
            NotificationFormatter::new("https://cases.example"),
        );
        let handler = CaseCreatedNotificationHandler::new(notifier);

        let event = DomainEvent::new(
            None,
            EventPayload::Case(CaseEvent::Created {
                case_id: CaseId::new(),
                serial: 1,
                subject: "Merger".into(),
                assigned_department: Some("Legal".into()),
                created_by: UserId::new(),
                actor: UserId::new(),
                creator_role: UserRole::SuperAdmin.to_string(),
            }),
        );
        handler.handle(&event).await.unwrap();

        assert_eq!(gateway.0.load(Ordering::SeqCst), 1);
    }
}
