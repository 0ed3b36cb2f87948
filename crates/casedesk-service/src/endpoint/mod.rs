//! Push endpoint registration.

pub mod service;

pub use service::EndpointService;
