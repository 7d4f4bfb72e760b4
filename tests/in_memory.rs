//! In-memory integration tests driving the wired platform.
//!
//! Tests are organized into modules by functionality:
//! - `programme_flow_tests`: Assignment, review and notification flow
//! - `warning_flow_tests`: Warning issue, resolution and link revocation
//! - `dashboard_tests`: Mentor and student projections

mod in_memory {
    pub mod helpers;

    mod dashboard_tests;
    mod programme_flow_tests;
    mod warning_flow_tests;
}
