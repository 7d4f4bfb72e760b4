//! Assignment statuses and the transition table.

use super::{ParseAssignmentStatusError, ParseReviewPolicyError, ParseReviewVerdictError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Assigned and awaiting a submission.
    Pending,
    /// Submitted and awaiting review.
    Submitted,
    /// Accepted by the mentor. Terminal.
    Approved,
    /// Sent back to the student for rework.
    Rejected,
}

impl AssignmentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Submitted,
        Self::Approved,
        Self::Rejected,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Returns the status reached by applying `event`, or `None` when the
    /// move is not allowed.
    ///
    /// | from      | submit    | review                               |
    /// |-----------|-----------|--------------------------------------|
    /// | pending   | submitted | verdict under `AllowOverride` only   |
    /// | submitted | -         | verdict                              |
    /// | rejected  | submitted | verdict under `AllowOverride` only   |
    /// | approved  | -         | -                                    |
    #[must_use]
    pub const fn apply(self, event: AssignmentEvent, policy: ReviewPolicy) -> Option<Self> {
        match (self, event) {
            (Self::Approved, _) | (Self::Submitted, AssignmentEvent::Submit) => None,
            (Self::Pending | Self::Rejected, AssignmentEvent::Submit) => Some(Self::Submitted),
            (Self::Submitted, AssignmentEvent::Review(verdict)) => Some(verdict.status()),
            (Self::Pending | Self::Rejected, AssignmentEvent::Review(verdict)) => {
                if policy.allows_override() {
                    Some(verdict.status())
                } else {
                    None
                }
            }
        }
    }
}

impl TryFrom<&str> for AssignmentStatus {
    type Error = ParseAssignmentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseAssignmentStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a mentor review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    /// The submission is accepted.
    Approved,
    /// The submission needs rework.
    Rejected,
}

impl ReviewVerdict {
    /// Returns the status the verdict moves an assignment to.
    #[must_use]
    pub const fn status(self) -> AssignmentStatus {
        match self {
            Self::Approved => AssignmentStatus::Approved,
            Self::Rejected => AssignmentStatus::Rejected,
        }
    }

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.status().as_str()
    }
}

impl TryFrom<&str> for ReviewVerdict {
    type Error = ParseReviewVerdictError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseReviewVerdictError(value.to_owned())),
        }
    }
}

impl fmt::Display for ReviewVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event driving an assignment transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentEvent {
    /// The student hands in work.
    Submit,
    /// The mentor records a verdict.
    Review(ReviewVerdict),
}

impl fmt::Display for AssignmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => f.write_str("submit"),
            Self::Review(verdict) => write!(f, "review as {verdict}"),
        }
    }
}

/// Whether mentors may review work that has not been submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReviewPolicy {
    /// Only submitted work can be reviewed.
    #[default]
    RequireSubmission,
    /// Any non-terminal assignment can be reviewed.
    AllowOverride,
}

impl ReviewPolicy {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequireSubmission => "require_submission",
            Self::AllowOverride => "allow_override",
        }
    }

    /// Returns whether pending or rejected work may be reviewed.
    #[must_use]
    pub const fn allows_override(self) -> bool {
        matches!(self, Self::AllowOverride)
    }
}

impl TryFrom<&str> for ReviewPolicy {
    type Error = ParseReviewPolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "require_submission" => Ok(Self::RequireSubmission),
            "allow_override" => Ok(Self::AllowOverride),
            _ => Err(ParseReviewPolicyError(value.to_owned())),
        }
    }
}
