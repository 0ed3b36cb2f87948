//! Creation notifier: fans a new case out to its department.

use tracing::{debug, info};

use casedesk_core::events::CaseEvent;
use casedesk_core::result::AppResult;
use casedesk_entity::user::UserRole;

use super::dispatcher::{DispatchReport, NotificationDispatcher};
use super::formatter::NotificationFormatter;
use super::rules::NotificationRules;

/// Notifies a department when a top-level administrator files a case
/// for it.
#[derive(Clone)]
pub struct CreationNotifier {
    rules: NotificationRules,
    dispatcher: NotificationDispatcher,
    formatter: NotificationFormatter,
}

impl CreationNotifier {
    /// Creates a new creation notifier.
    pub fn new(
        rules: NotificationRules,
        dispatcher: NotificationDispatcher,
        formatter: NotificationFormatter,
    ) -> Self {
        Self {
            rules,
            dispatcher,
            formatter,
        }
    }

    /// React to a case event.
    ///
    /// Returns `None` when nothing was sent: the acting user is not a
    /// top-level administrator, the case has no department, or nobody in
    /// the department has a registered endpoint.
    pub async fn on_case_event(&self, event: &CaseEvent) -> AppResult<Option<DispatchReport>> {
        let CaseEvent::Created {
            case_id,
            serial,
            subject,
            assigned_department,
            actor,
            creator_role,
            ..
        } = event;

        let top_level = creator_role
            .parse::<UserRole>()
            .map(|r| r.is_top_level())
            .unwrap_or(false);
        if !top_level {
            debug!(case_id = %case_id, role = %creator_role, "Creator is not top-level, skipping notification");
            return Ok(None);
        }

        let Some(department) = assigned_department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        else {
            debug!(case_id = %case_id, "Case has no department, skipping notification");
            return Ok(None);
        };

        let recipients = self
            .rules
            .department_recipients(department, *actor)
            .await?;
        if recipients.is_empty() {
            info!(case_id = %case_id, department = %department, "No recipients in department");
            return Ok(None);
        }

        let tokens = self.dispatcher.resolve_tokens(&recipients).await?;
        if tokens.is_empty() {
            info!(
                case_id = %case_id,
                department = %department,
                recipients = recipients.len(),
                "No registered endpoints for department"
            );
            return Ok(None);
        }

        let job = self
            .formatter
            .case_created(*case_id, *serial, subject, department, tokens);
        let report = self.dispatcher.dispatch(&job).await;

        info!(
            case_id = %case_id,
            department = %department,
            success_count = report.success_count,
            failure_count = report.failure_count,
            pruned_count = report.pruned_count,
            "Creation notification dispatched"
        );

        Ok(Some(report))
    }
}
