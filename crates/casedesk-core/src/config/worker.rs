//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background event worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of events handled concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Capacity of the in-process event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// Seconds to wait for in-flight events on shutdown.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            concurrency: default_concurrency(),
            event_buffer: default_event_buffer(),
            shutdown_grace_seconds: default_shutdown_grace(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    4
}

fn default_event_buffer() -> usize {
    1024
}

fn default_shutdown_grace() -> u64 {
    30
}
