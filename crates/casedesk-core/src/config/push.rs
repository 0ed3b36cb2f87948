//! Push gateway configuration.

use serde::{Deserialize, Serialize};

/// Settings for the push-delivery gateway used by case notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Whether creation notifications are sent at all.
    #[serde(default)]
    pub enabled: bool,
    /// Multicast endpoint of the gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Bearer credential presented to the gateway.
    #[serde(default)]
    pub api_key: String,
    /// Upper bound on a single gateway call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum tokens per multicast call.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Base URL of the web client; case links are built from it.
    #[serde(default = "default_click_base_url")]
    pub click_base_url: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            gateway_url: default_gateway_url(),
            api_key: String::new(),
            timeout_ms: default_timeout_ms(),
            max_batch_size: default_max_batch_size(),
            click_base_url: default_click_base_url(),
        }
    }
}

fn default_gateway_url() -> String {
    "http://localhost:8090/v1/multicast".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_batch_size() -> usize {
    500
}

fn default_click_base_url() -> String {
    "http://localhost:3000".to_string()
}
