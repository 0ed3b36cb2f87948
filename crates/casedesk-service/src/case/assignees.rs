//! Assignee email resolution.

use tracing::warn;

use casedesk_core::error::{AppError, ErrorKind};
use casedesk_core::result::AppResult;
use casedesk_core::traits::UserDirectory;
use casedesk_core::types::id::UserId;

/// Resolve assignee emails to user ids through the directory.
///
/// Emails with no matching user are dropped (logged at `warn`). A blank
/// email or a failed lookup is a `Validation` error naming the email.
/// Duplicates collapse, keeping first-seen order.
pub async fn resolve_assignees(
    directory: &dyn UserDirectory,
    emails: &[String],
) -> AppResult<Vec<UserId>> {
    let mut resolved = Vec::with_capacity(emails.len());

    for raw in emails {
        let email = raw.trim();
        if email.is_empty() {
            return Err(AppError::validation("Assignee email cannot be blank"));
        }

        let found = directory.find_by_email(email).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Could not resolve assignee '{email}'"),
                e,
            )
        })?;

        match found {
            Some(id) if !resolved.contains(&id) => resolved.push(id),
            Some(_) => {}
            None => warn!(email = %email, "Dropping unknown assignee"),
        }
    }

    Ok(resolved)
}
