//! Event runner: drains the domain-event channel and executes events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc, watch};
use tracing;

use casedesk_core::config::WorkerConfig;
use casedesk_core::events::DomainEvent;

use crate::executor::{EventExecutor, EventHandlingError};

/// Consumes domain events and hands each to the executor on its own task.
pub struct EventRunner {
    /// Incoming events.
    receiver: mpsc::Receiver<DomainEvent>,
    /// Handler registry.
    executor: Arc<EventExecutor>,
    /// Worker configuration.
    config: WorkerConfig,
}

impl EventRunner {
    /// Create a new event runner.
    pub fn new(
        receiver: mpsc::Receiver<DomainEvent>,
        executor: Arc<EventExecutor>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            receiver,
            executor,
            config,
        }
    }

    /// Run until `cancel` flips to `true` or every sender is dropped, then
    /// wait up to the configured grace period for in-flight events.
    pub async fn run(mut self, mut cancel: watch::Receiver<bool>) {
        let concurrency = self.config.concurrency.max(1);
        tracing::info!(
            concurrency,
            handlers = ?self.executor.registered_types(),
            "Event runner started"
        );

        let semaphore = Arc::new(Semaphore::new(concurrency));

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Event runner received shutdown signal");
                        break;
                    }
                }
                next = self.receiver.recv() => {
                    let Some(event) = next else {
                        tracing::info!("Event channel closed");
                        break;
                    };
                    let Ok(permit) = semaphore.clone().acquire_owned().await else {
                        break;
                    };
                    let executor = Arc::clone(&self.executor);
                    tokio::spawn(async move {
                        let _permit = permit;
                        process(&executor, event).await;
                    });
                }
            }
        }

        tracing::info!("Event runner waiting for in-flight events");
        let grace = Duration::from_secs(self.config.shutdown_grace_seconds);
        let in_flight = u32::try_from(concurrency).unwrap_or(u32::MAX);
        if tokio::time::timeout(grace, semaphore.acquire_many(in_flight))
            .await
            .is_err()
        {
            tracing::warn!("Event runner grace period elapsed with events still in flight");
        }

        tracing::info!("Event runner shut down complete");
    }
}

async fn process(executor: &EventExecutor, event: DomainEvent) {
    let event_id = event.id;
    let event_type = event.event_type();

    match executor.execute(&event).await {
        Ok(_) => {}
        Err(EventHandlingError::Transient(msg)) => {
            tracing::warn!(event_id = %event_id, event_type, error = %msg, "Event failed (transient)");
        }
        Err(EventHandlingError::Rejected(msg)) => {
            tracing::error!(event_id = %event_id, event_type, error = %msg, "Event rejected");
        }
        Err(EventHandlingError::Internal(err)) => {
            tracing::error!(event_id = %event_id, event_type, error = %err, "Event internal error");
        }
    }
}
