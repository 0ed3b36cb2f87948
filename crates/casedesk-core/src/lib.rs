//! # casedesk-core
//!
//! Core crate for CaseDesk. Contains the unified error system, configuration
//! schemas, typed identifiers, domain events, push-delivery value types and
//! the storage-agnostic traits (serial allocation, user directory, endpoint
//! directory, push gateway) implemented by the other crates.
//!
//! This crate has **no** internal dependencies on other CaseDesk crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
