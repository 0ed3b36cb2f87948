//! Notification dispatcher: endpoint resolution, multicast delivery and
//! pruning of dead endpoints.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use casedesk_core::config::PushConfig;
use casedesk_core::result::AppResult;
use casedesk_core::traits::{EndpointDirectory, PushGateway};
use casedesk_core::types::id::UserId;
use casedesk_core::types::push::{DeliveryStatus, PushMessage};
use casedesk_entity::notification::NotificationJob;

/// Aggregate outcome of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Tokens the gateway accepted.
    pub success_count: usize,
    /// Tokens that were not delivered, for any reason.
    pub failure_count: usize,
    /// Invalid tokens removed from the endpoint directory.
    pub pruned_count: usize,
}

/// Sends notification jobs through the push gateway.
#[derive(Clone)]
pub struct NotificationDispatcher {
    gateway: Arc<dyn PushGateway>,
    endpoints: Arc<dyn EndpointDirectory>,
    max_batch_size: usize,
    call_timeout: Duration,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        gateway: Arc<dyn PushGateway>,
        endpoints: Arc<dyn EndpointDirectory>,
        max_batch_size: usize,
        call_timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            endpoints,
            max_batch_size: max_batch_size.max(1),
            call_timeout,
        }
    }

    /// Creates a dispatcher with batch size and timeout from `config`.
    pub fn from_config(
        gateway: Arc<dyn PushGateway>,
        endpoints: Arc<dyn EndpointDirectory>,
        config: &PushConfig,
    ) -> Self {
        Self::new(
            gateway,
            endpoints,
            config.max_batch_size,
            Duration::from_millis(config.timeout_ms),
        )
    }

    /// Flatten the endpoints of every recipient into one token list,
    /// deduplicated in first-seen order.
    pub async fn resolve_tokens(&self, recipients: &[UserId]) -> AppResult<Vec<String>> {
        let mut tokens: Vec<String> = Vec::new();
        for recipient in recipients {
            for token in self.endpoints.resolve(*recipient).await? {
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
        }
        Ok(tokens)
    }

    /// Deliver `job` and prune every token the gateway reports as invalid.
    ///
    /// Never fails: a failed or timed-out gateway call marks that batch's
    /// tokens as failed and the remaining batches are still sent.
    pub async fn dispatch(&self, job: &NotificationJob) -> DispatchReport {
        let mut report = DispatchReport::default();

        for message in job.to_messages(self.max_batch_size) {
            self.send_batch(&message, &mut report).await;
        }

        report
    }

    async fn send_batch(&self, message: &PushMessage, report: &mut DispatchReport) {
        let batch_size = message.tokens.len();

        let outcomes =
            match tokio::time::timeout(self.call_timeout, self.gateway.send_multicast(message))
                .await
            {
                Ok(Ok(outcomes)) => outcomes,
                Ok(Err(e)) => {
                    warn!(error = %e, batch_size, "Push gateway call failed");
                    report.failure_count += batch_size;
                    return;
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.call_timeout.as_millis() as u64,
                        batch_size, "Push gateway call timed out"
                    );
                    report.failure_count += batch_size;
                    return;
                }
            };

        let mut pending: HashSet<&str> = message.tokens.iter().map(String::as_str).collect();

        for outcome in outcomes {
            // Only outcomes for tokens in this batch may touch the directory.
            if !pending.remove(outcome.token.as_str()) {
                warn!(batch_size, "Ignoring gateway outcome for a token outside the batch");
                continue;
            }
            match outcome.status {
                DeliveryStatus::Delivered => report.success_count += 1,
                DeliveryStatus::Transient => {
                    debug!("Transient delivery failure");
                    report.failure_count += 1;
                }
                DeliveryStatus::InvalidToken => {
                    report.failure_count += 1;
                    match self.endpoints.prune(&outcome.token).await {
                        Ok(true) => report.pruned_count += 1,
                        Ok(false) => {}
                        Err(e) => warn!(error = %e, "Failed to prune invalid endpoint"),
                    }
                }
            }
        }

        // Tokens the gateway said nothing about count as failed.
        report.failure_count += pending.len();
    }
}
