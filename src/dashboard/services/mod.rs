//! Service orchestration for dashboards.

mod dashboard;

pub use dashboard::{DashboardError, DashboardResult, DashboardService};
