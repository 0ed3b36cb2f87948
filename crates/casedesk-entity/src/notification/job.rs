//! Ephemeral push notification job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use casedesk_core::types::push::PushMessage;

/// One notification addressed to a flat list of endpoint tokens.
///
/// Jobs are built in memory and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationJob {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// String-only data payload.
    pub data: BTreeMap<String, String>,
    /// URL opened when the notification is clicked.
    pub click_target: Option<String>,
    /// Endpoint tokens to deliver to.
    pub recipient_tokens: Vec<String>,
}

impl NotificationJob {
    /// Whether there is anyone to deliver to.
    pub fn has_recipients(&self) -> bool {
        !self.recipient_tokens.is_empty()
    }

    /// Split the job into gateway messages of at most `max_batch_size`
    /// tokens each. A size of zero is treated as one.
    pub fn to_messages(&self, max_batch_size: usize) -> Vec<PushMessage> {
        self.recipient_tokens
            .chunks(max_batch_size.max(1))
            .map(|tokens| PushMessage {
                tokens: tokens.to_vec(),
                title: self.title.clone(),
                body: self.body.clone(),
                data: self.data.clone(),
                click_target: self.click_target.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(tokens: usize) -> NotificationJob {
        NotificationJob {
            title: "t".into(),
            body: "b".into(),
            data: BTreeMap::new(),
            click_target: None,
            recipient_tokens: (0..tokens).map(|i| format!("tok-{i}")).collect(),
        }
    }

    #[test]
    fn test_single_message_under_limit() {
        let messages = job(3).to_messages(500);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].tokens, vec!["tok-0", "tok-1", "tok-2"]);
    }

    #[test]
    fn test_chunking_over_limit() {
        let messages = job(5).to_messages(2);
        let sizes: Vec<_> = messages.iter().map(|m| m.tokens.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_no_recipients() {
        assert!(!job(0).has_recipients());
        assert!(job(0).to_messages(10).is_empty());
    }
}
