//! Service orchestration for the warning lifecycle.

mod lifecycle;

pub use lifecycle::{
    IssueWarningRequest, IssuedWarning, StudentWarnings, WarningError, WarningLifecycleService,
    WarningResult,
};
