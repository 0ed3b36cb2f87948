//! Core type definitions used across the CaseDesk workspace.

pub mod id;
pub mod push;

pub use id::*;
pub use push::{DeliveryOutcome, DeliveryStatus, PushMessage};
