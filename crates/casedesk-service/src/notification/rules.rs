//! Recipient resolution for case notifications.

use std::sync::Arc;

use casedesk_core::result::AppResult;
use casedesk_core::traits::UserDirectory;
use casedesk_core::types::id::UserId;

/// Decides which users hear about a case.
#[derive(Clone)]
pub struct NotificationRules {
    directory: Arc<dyn UserDirectory>,
}

impl NotificationRules {
    /// Creates a new rules engine.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Every member of `department` except `exclude_actor`, deduplicated in
    /// directory order.
    pub async fn department_recipients(
        &self,
        department: &str,
        exclude_actor: UserId,
    ) -> AppResult<Vec<UserId>> {
        let members = self.directory.find_by_department(department).await?;

        let mut recipients = Vec::with_capacity(members.len());
        for entry in members {
            if entry.user_id != exclude_actor && !recipients.contains(&entry.user_id) {
                recipients.push(entry.user_id);
            }
        }
        Ok(recipients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{member, seeded_directory};

    #[tokio::test]
    async fn test_creator_is_excluded() {
        let (u1, u2, creator) = (
            member("u1@x.com", "Legal"),
            member("u2@x.com", "Legal"),
            member("boss@x.com", "Legal"),
        );
        let other = member("u3@x.com", "Finance");
        let rules = NotificationRules::new(Arc::new(seeded_directory(vec![
            u1.clone(),
            creator.clone(),
            other,
            u2.clone(),
        ])));

        let recipients = rules
            .department_recipients("Legal", creator.id)
            .await
            .unwrap();
        assert_eq!(recipients, vec![u1.id, u2.id]);
    }
}
