//! Service orchestration for the assignment lifecycle.

mod lifecycle;

pub use lifecycle::{
    AssignmentError, AssignmentLifecycleService, AssignmentResult, ReviewRequest, SubmitRequest,
};
