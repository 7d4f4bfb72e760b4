//! Dashboard read models.

mod stats;
mod views;

pub use stats::{AssignmentStats, completion_percentage};
pub use views::{CourseProgress, CourseSummary, MentorDashboard, StudentDashboard, StudentProgress};
