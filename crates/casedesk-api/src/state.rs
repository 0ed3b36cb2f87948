//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use casedesk_core::config::AppConfig;
use casedesk_core::traits::SerialAllocator;
use casedesk_database::DatabasePool;
use casedesk_service::{CaseService, EndpointService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool; `None` when running on in-memory stores
    pub database: Option<DatabasePool>,
    /// Serial allocator, probed by the health endpoint
    pub serials: Arc<dyn SerialAllocator>,
    /// Case lifecycle service
    pub case_service: Arc<CaseService>,
    /// Push endpoint registration service
    pub endpoint_service: Arc<EndpointService>,
}
