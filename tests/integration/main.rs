//! HTTP-level integration tests over in-memory backends.

mod helpers;

mod case_test;
mod endpoint_test;
mod health_test;
mod notification_test;
