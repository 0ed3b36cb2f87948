//! # casedesk-database
//!
//! PostgreSQL connection management, repository implementations of the
//! store traits, and in-memory equivalents for single-node and test use.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::CaseStore;
