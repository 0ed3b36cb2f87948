//! # casedesk-api
//!
//! HTTP surface of CaseDesk: case records, their comments and attachments,
//! push endpoint registration and health. Handlers are thin; every rule
//! lives in `casedesk-service`.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
