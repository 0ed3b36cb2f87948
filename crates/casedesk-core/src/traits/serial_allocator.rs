//! Serial allocator trait for human-facing case numbers.

use async_trait::async_trait;

use crate::result::AppResult;

/// Name of the sequence that numbers case records.
pub const CASE_SEQUENCE: &str = "case";

/// Trait for atomic allocation from named monotonic sequences.
///
/// Implementations must guarantee atomicity: the increment and the read of
/// the new value happen as one step in the backing store, so C concurrent
/// callers of the same sequence receive C distinct values forming a
/// contiguous run. Two implementations are provided:
/// - PostgreSQL (single upsert-increment statement)
/// - In-memory (per-key entry lock)
#[async_trait]
pub trait SerialAllocator: Send + Sync + 'static {
    /// Increment `sequence` and return the new value.
    ///
    /// A sequence that has never been used starts at 0, so the first call
    /// returns 1. On failure no value is consumed from the caller's view
    /// and the error kind is `Allocator`.
    async fn next(&self, sequence: &str) -> AppResult<i64>;

    /// Read the current value of `sequence` without incrementing it.
    async fn current(&self, sequence: &str) -> AppResult<Option<i64>>;

    /// Check that the allocator backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
