//! Push endpoint directory trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;

/// Per-user registry of push-delivery tokens.
///
/// A token is unique across the whole directory; one owner may hold many
/// tokens (one per device or browser).
#[async_trait]
pub trait EndpointDirectory: Send + Sync + 'static {
    /// Register `token` for `owner`.
    ///
    /// Idempotent: registering a token the owner already holds is a no-op.
    /// A token currently held by another owner moves to `owner`.
    /// Returns `true` if the directory changed.
    async fn register(&self, owner: UserId, token: &str) -> AppResult<bool>;

    /// All tokens currently registered to `owner`, oldest first.
    async fn resolve(&self, owner: UserId) -> AppResult<Vec<String>>;

    /// Remove the registration holding `token`, whoever owns it.
    ///
    /// Returns `true` if a registration was removed; pruning an absent
    /// token is not an error.
    async fn prune(&self, token: &str) -> AppResult<bool>;

    /// Remove `token` only if it belongs to `owner`.
    async fn unregister(&self, owner: UserId, token: &str) -> AppResult<bool>;
}
