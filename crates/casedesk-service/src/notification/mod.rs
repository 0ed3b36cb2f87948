//! Push notifications for newly created cases.

pub mod creation;
pub mod dispatcher;
pub mod formatter;
pub mod gateway;
pub mod rules;

pub use creation::CreationNotifier;
pub use dispatcher::{DispatchReport, NotificationDispatcher};
pub use formatter::NotificationFormatter;
pub use gateway::HttpPushGateway;
pub use rules::NotificationRules;
