//! Core traits defined in `casedesk-core` and implemented by other crates.

pub mod directory;
pub mod endpoint;
pub mod push;
pub mod serial_allocator;

pub use directory::{DirectoryEntry, UserDirectory};
pub use endpoint::EndpointDirectory;
pub use push::PushGateway;
pub use serial_allocator::SerialAllocator;
