//! PostgreSQL implementations of the store traits.

pub mod case;
pub mod endpoint;
pub mod serial;
pub mod user;

pub use case::CaseRepository;
pub use endpoint::EndpointRepository;
pub use serial::PgSerialAllocator;
pub use user::UserRepository;
