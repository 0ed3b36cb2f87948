//! # casedesk-service
//!
//! Business logic for CaseDesk. [`CaseService`] owns the case-record
//! lifecycle (creation with serial allocation, bounded updates, the comment
//! ledger and attachment registry); [`EndpointService`] manages push
//! endpoint registrations; the `notification` module fans creation events
//! out to a department's devices.
//!
//! Services take their collaborators as `Arc<dyn Trait>` at construction
//! time, so the same code runs against PostgreSQL or the in-memory stores.

pub mod case;
pub mod context;
pub mod endpoint;
pub mod events;
pub mod notification;

#[cfg(test)]
mod test_support;

pub use case::CaseService;
pub use context::RequestContext;
pub use endpoint::EndpointService;
pub use events::CaseEventPublisher;
pub use notification::{
    CreationNotifier, DispatchReport, HttpPushGateway, NotificationDispatcher,
    NotificationFormatter, NotificationRules,
};
