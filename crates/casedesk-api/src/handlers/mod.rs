//! Route handlers organized by domain.

pub mod case;
pub mod endpoint;
pub mod health;
