//! Notification domain entities.

pub mod job;

pub use job::NotificationJob;
