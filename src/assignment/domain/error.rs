//! Error types for assignment validation and transitions.

use super::{AssignmentEvent, AssignmentStatus};
use thiserror::Error;

/// Errors returned while building or transitioning assignments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentDomainError {
    /// Neither a repository link nor a hosted link was supplied.
    #[error("at least one of github_link or hosted_link is required")]
    MissingSubmissionLink,

    /// A link does not use the `http` or `https` scheme.
    #[error("invalid submission link '{0}', expected an http(s) URL")]
    InvalidLink(String),

    /// The transition table rejects the event in the current status.
    #[error("cannot {event} an assignment that is {from}")]
    InvalidTransition {
        /// Status the assignment is in.
        from: AssignmentStatus,
        /// Rejected event.
        event: AssignmentEvent,
    },
}

/// Error returned while parsing assignment statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown assignment status: {0}")]
pub struct ParseAssignmentStatusError(pub String);

/// Error returned while parsing a review verdict.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid review status '{0}', expected approved or rejected")]
pub struct ParseReviewVerdictError(pub String);

/// Error returned while parsing a review policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown review policy: {0}")]
pub struct ParseReviewPolicyError(pub String);
