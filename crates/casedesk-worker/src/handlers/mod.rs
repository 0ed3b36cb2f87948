//! Event handler implementations.

pub mod notification;

pub use notification::CaseCreatedNotificationHandler;
