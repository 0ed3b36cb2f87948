//! Push endpoint registrations.

pub mod model;

pub use model::EndpointRegistration;
