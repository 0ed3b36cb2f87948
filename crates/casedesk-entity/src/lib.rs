//! # casedesk-entity
//!
//! Domain entity models for CaseDesk. Every struct in this crate
//! represents a database table row, an embedded JSON document, or a domain
//! value object. Database entities additionally derive `sqlx::FromRow`.

pub mod case;
pub mod endpoint;
pub mod notification;
pub mod user;
