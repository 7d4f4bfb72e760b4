//! Error types for warning validation and transitions.

use super::{WarningEvent, WarningStatus};
use thiserror::Error;

/// Errors returned while issuing or resolving warnings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WarningDomainError {
    /// The title is empty after trimming.
    #[error("warning title must not be empty")]
    EmptyTitle,

    /// The remark is empty after trimming.
    #[error("warning remark must not be empty")]
    EmptyRemark,

    /// The resolution comment is empty after trimming.
    #[error("resolution comment must not be empty")]
    EmptyResolutionComment,

    /// A new warning was requested in a status other than active.
    #[error("new warnings must be active, not {0}")]
    InvalidInitialStatus(WarningStatus),

    /// The transition table rejects the event in the current status.
    #[error("cannot {event} a warning that is {from}")]
    InvalidTransition {
        /// Status the warning is in.
        from: WarningStatus,
        /// Rejected event.
        event: WarningEvent,
    },
}

/// Error returned while parsing warning levels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid warning level '{0}', expected low, medium, high or critical")]
pub struct ParseWarningLevelError(pub String);

/// Error returned while parsing warning statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown warning status: {0}")]
pub struct ParseWarningStatusError(pub String);
