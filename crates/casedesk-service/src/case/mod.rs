//! Case-record lifecycle: creation, updates, comments and attachments.

pub mod assignees;
pub mod ledger;
pub mod service;

pub use assignees::resolve_assignees;
pub use service::CaseService;
