//! Service orchestration for the mentor-student roster.

mod roster;

pub use roster::{
    OnboardStudentRequest, RosterError, RosterResult, RosterService, require_active_link,
};
