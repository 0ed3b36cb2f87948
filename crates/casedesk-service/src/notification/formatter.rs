//! Notification content for case events.

use std::collections::BTreeMap;

use casedesk_core::types::id::CaseId;
use casedesk_entity::notification::NotificationJob;

/// Builds notification jobs for case events.
#[derive(Debug, Clone)]
pub struct NotificationFormatter {
    click_base_url: String,
}

impl NotificationFormatter {
    /// `click_base_url` is the web client's base URL.
    pub fn new(click_base_url: impl Into<String>) -> Self {
        Self {
            click_base_url: click_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Link to a case in the web client.
    pub fn case_link(&self, case_id: CaseId) -> String {
        format!("{}/cases/{case_id}", self.click_base_url)
    }

    /// Job announcing a case newly assigned to `department`.
    pub fn case_created(
        &self,
        case_id: CaseId,
        serial: i64,
        subject: &str,
        department: &str,
        tokens: Vec<String>,
    ) -> NotificationJob {
        let mut data = BTreeMap::new();
        data.insert("case_id".to_string(), case_id.to_string());
        data.insert("serial".to_string(), serial.to_string());
        data.insert("department".to_string(), department.to_string());

        NotificationJob {
            title: format!("New {department} case: {subject}"),
            body: format!("Case #{serial} \"{subject}\" was assigned to {department}"),
            data,
            click_target: Some(self.case_link(case_id)),
            recipient_tokens: tokens,
        }
    }
}
