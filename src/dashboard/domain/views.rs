//! Dashboard projections returned to callers.

use super::AssignmentStats;
use crate::catalog::domain::CourseId;
use crate::identity::domain::UserId;
use crate::roster::domain::StudentProfile;
use crate::warning::domain::WarningSummary;
use serde::Serialize;

/// Overview shown to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentDashboard {
    /// The student's profile.
    pub profile: StudentProfile,
    /// Assignment counts by status.
    pub assignments: AssignmentStats,
    /// Number of mentors with an active link to the student.
    pub active_mentors: u32,
    /// Warning counts and standing.
    pub warnings: WarningSummary,
}

/// Course reference in a progress report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    /// Course identifier.
    pub course_id: CourseId,
    /// Course title.
    pub title: String,
}

/// A student's progress across assigned tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentProgress {
    /// The student.
    pub student_id: UserId,
    /// Distinct courses the student has assignments in.
    pub courses: Vec<CourseSummary>,
    /// Assignment counts by status.
    pub tasks: AssignmentStats,
    /// Submitted work as a percentage of all assignments.
    pub completion_percentage: f64,
}

/// Assignment progress within one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseProgress {
    /// The course.
    pub course: CourseSummary,
    /// Assignment counts by status.
    pub assignments: AssignmentStats,
    /// Submitted work as a percentage of the course's assignments.
    pub completion_percentage: f64,
}

/// Overview shown to a mentor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentorDashboard {
    /// The mentor.
    pub mentor_id: UserId,
    /// Number of actively linked students.
    pub active_students: u32,
    /// Progress per owned course, newest course first.
    pub courses: Vec<CourseProgress>,
    /// Submissions awaiting review across all courses.
    pub awaiting_review: u32,
}
