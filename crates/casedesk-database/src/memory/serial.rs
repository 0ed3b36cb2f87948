//! In-memory serial allocator.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use casedesk_core::result::AppResult;
use casedesk_core::traits::SerialAllocator;

/// Serial allocator holding its counters in a [`DashMap`].
///
/// The increment runs while the entry's shard lock is held, so each call
/// observes and bumps the counter in one step.
#[derive(Debug, Clone, Default)]
pub struct MemorySerialAllocator {
    counters: Arc<DashMap<String, i64>>,
}

impl MemorySerialAllocator {
    /// Create an allocator with no sequences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose `sequence` starts at `value`.
    pub fn starting_at(sequence: &str, value: i64) -> Self {
        let allocator = Self::new();
        allocator.counters.insert(sequence.to_string(), value);
        allocator
    }
}

#[async_trait]
impl SerialAllocator for MemorySerialAllocator {
    async fn next(&self, sequence: &str) -> AppResult<i64> {
        let mut counter = self.counters.entry(sequence.to_string()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn current(&self, sequence: &str) -> AppResult<Option<i64>> {
        Ok(self.counters.get(sequence).map(|v| *v))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
