//! Push gateway trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::push::{DeliveryOutcome, PushMessage};

/// A multicast push-delivery gateway.
#[async_trait]
pub trait PushGateway: Send + Sync + 'static {
    /// Send `message` to every token it names.
    ///
    /// Returns one outcome per token. An `Err` means the call as a whole
    /// failed (gateway unreachable, malformed response) and no per-token
    /// information is available.
    async fn send_multicast(&self, message: &PushMessage) -> AppResult<Vec<DeliveryOutcome>>;
}
