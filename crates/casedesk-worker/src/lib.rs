//! Background processing of CaseDesk domain events.
//!
//! This crate provides:
//! - An event executor that routes each event to the handler registered
//!   for its type
//! - An event runner that drains the in-process event channel with bounded
//!   concurrency and shuts down gracefully
//! - The creation-notification handler

pub mod executor;
pub mod handlers;
pub mod runner;

pub use executor::{EventExecutor, EventHandler, EventHandlingError};
pub use runner::EventRunner;
