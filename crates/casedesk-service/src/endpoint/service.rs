//! Endpoint registration service.

use std::sync::Arc;

use tracing::info;

use casedesk_core::AppError;
use casedesk_core::result::AppResult;
use casedesk_core::traits::EndpointDirectory;

use crate::context::RequestContext;

/// Longest token accepted from a client.
const MAX_TOKEN_LEN: usize = 4096;

/// Lets clients register and remove their own push endpoints.
#[derive(Clone)]
pub struct EndpointService {
    directory: Arc<dyn EndpointDirectory>,
}

impl std::fmt::Debug for EndpointService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointService").finish_non_exhaustive()
    }
}

impl EndpointService {
    /// Creates a new endpoint service.
    pub fn new(directory: Arc<dyn EndpointDirectory>) -> Self {
        Self { directory }
    }

    /// Register `token` for the acting user. Returns whether anything changed.
    pub async fn register(&self, ctx: &RequestContext, token: &str) -> AppResult<bool> {
        let token = validate_token(token)?;
        let changed = self.directory.register(ctx.user_id, token).await?;
        if changed {
            info!(owner = %ctx.user_id, "Push endpoint registered");
        }
        Ok(changed)
    }

    /// Remove one of the acting user's tokens.
    pub async fn unregister(&self, ctx: &RequestContext, token: &str) -> AppResult<()> {
        let token = validate_token(token)?;
        if !self.directory.unregister(ctx.user_id, token).await? {
            return Err(AppError::not_found("Push endpoint not found"));
        }
        info!(owner = %ctx.user_id, "Push endpoint unregistered");
        Ok(())
    }
}

fn validate_token(token: &str) -> AppResult<&str> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::validation("Endpoint token is required"));
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(AppError::validation("Endpoint token is too long"));
    }
    Ok(token)
}
