//! In-memory implementations of the store traits.
//!
//! Suitable for single-node development and tests. State lives for the
//! lifetime of the process.

pub mod case;
pub mod directory;
pub mod endpoint;
pub mod serial;

pub use case::MemoryCaseStore;
pub use directory::MemoryUserDirectory;
pub use endpoint::MemoryEndpointDirectory;
pub use serial::MemorySerialAllocator;
