//! Domain model for task assignments.

mod assignment;
mod error;
mod ids;
mod status;
mod submission;

pub use assignment::{PersistedAssignmentData, TaskAssignment, sort_newest_submission_first};
pub use error::{
    AssignmentDomainError, ParseAssignmentStatusError, ParseReviewPolicyError,
    ParseReviewVerdictError,
};
pub use ids::AssignmentId;
pub use status::{AssignmentEvent, AssignmentStatus, ReviewPolicy, ReviewVerdict};
pub use submission::SubmissionLinks;
