//! Dashboard aggregation over the lifecycle ports.

use crate::assignment::{
    domain::{AssignmentStatus, TaskAssignment},
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use crate::catalog::{
    domain::{CourseId, TaskId},
    ports::{CatalogRepository, CatalogRepositoryError},
};
use crate::dashboard::domain::{
    AssignmentStats, CourseProgress, CourseSummary, MentorDashboard, StudentDashboard,
    StudentProgress,
};
use crate::error::{ClassifyError, ErrorKind};
use crate::identity::domain::{Identity, IdentityDomainError, UserId};
use crate::roster::{
    domain::StudentProfile,
    ports::{RosterRepository, RosterRepositoryError},
};
use crate::warning::{
    domain::WarningSummary,
    ports::{WarningRepository, WarningRepositoryError},
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for dashboard queries.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The caller's role does not permit the query.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// The student has no profile.
    #[error("student not found: {0}")]
    StudentNotFound(UserId),

    /// Assignment lookup failed.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),

    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),

    /// Roster lookup failed.
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),

    /// Warning lookup failed.
    #[error(transparent)]
    Warnings(#[from] WarningRepositoryError),
}

impl ClassifyError for DashboardError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(err) => err.kind(),
            Self::StudentNotFound(_) => ErrorKind::NotFound,
            Self::Assignments(err) => err.kind(),
            Self::Catalog(err) => err.kind(),
            Self::Roster(err) => err.kind(),
            Self::Warnings(err) => err.kind(),
        }
    }
}

/// Result type for dashboard queries.
pub type DashboardResult<T> = Result<T, DashboardError>;

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Read-only dashboard service.
#[derive(Clone)]
pub struct DashboardService<S>
where
    S: AssignmentRepository + CatalogRepository + RosterRepository + WarningRepository,
{
    store: Arc<S>,
}

impl<S> DashboardService<S>
where
    S: AssignmentRepository + CatalogRepository + RosterRepository + WarningRepository,
{
    /// Creates a new dashboard service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn profile(&self, student_id: &UserId) -> DashboardResult<StudentProfile> {
        self.store
            .find_profile(student_id)
            .await?
            .ok_or_else(|| DashboardError::StudentNotFound(student_id.clone()))
    }

    /// Builds the calling student's overview.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::StudentNotFound`] when the caller has no
    /// profile.
    pub async fn student_dashboard(&self, student: &Identity) -> DashboardResult<StudentDashboard> {
        let student_id = student.require_student()?;
        let profile = self.profile(student_id).await?;
        let assignments = self.store.list_for_student(student_id).await?;
        let mentors = self.store.active_links_for_student(student_id).await?;
        let warnings = self.store.warnings_for_student(student_id).await?;

        Ok(StudentDashboard {
            assignments: AssignmentStats::from_assignments(&assignments),
            active_mentors: count(mentors.len()),
            warnings: WarningSummary::new(profile.warning_count(), &warnings),
            profile,
        })
    }

    /// Reports the calling student's task progress.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::StudentNotFound`] when the caller has no
    /// profile.
    pub async fn student_progress(&self, student: &Identity) -> DashboardResult<StudentProgress> {
        let student_id = student.require_student()?;
        self.profile(student_id).await?;
        let assignments = self.store.list_for_student(student_id).await?;
        let task_ids: Vec<TaskId> = assignments.iter().map(TaskAssignment::task_id).collect();
        let entries = self.store.find_entries(&task_ids).await?;

        let courses: BTreeMap<CourseId, CourseSummary> = entries
            .iter()
            .map(|entry| {
                let course = entry.course();
                (
                    course.id(),
                    CourseSummary {
                        course_id: course.id(),
                        title: course.title().to_owned(),
                    },
                )
            })
            .collect();
        let tasks = AssignmentStats::from_assignments(&assignments);

        Ok(StudentProgress {
            student_id: student_id.clone(),
            courses: courses.into_values().collect(),
            completion_percentage: tasks.completion_percentage(),
            tasks,
        })
    }

    /// Builds the calling mentor's overview.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Identity`] for non-mentors.
    pub async fn mentor_dashboard(&self, mentor: &Identity) -> DashboardResult<MentorDashboard> {
        let mentor_id = mentor.require_mentor()?;
        let students = self.store.active_students(mentor_id).await?;
        let courses = self.store.courses_for_mentor(mentor_id).await?;
        let entries = self.store.entries_for_mentor(mentor_id).await?;
        let assignments = self.store.list_for_mentor(mentor_id).await?;

        let course_of: HashMap<TaskId, CourseId> = entries
            .iter()
            .map(|entry| (entry.task().id(), entry.course().id()))
            .collect();
        let mut per_course: HashMap<CourseId, AssignmentStats> = HashMap::new();
        let mut awaiting_review = 0_u32;
        for assignment in &assignments {
            if assignment.status() == AssignmentStatus::Submitted {
                awaiting_review = awaiting_review.saturating_add(1);
            }
            if let Some(course_id) = course_of.get(&assignment.task_id()) {
                per_course
                    .entry(*course_id)
                    .or_default()
                    .record(assignment.status());
            }
        }

        let progress = courses
            .iter()
            .map(|course| {
                let stats = per_course.get(&course.id()).copied().unwrap_or_default();
                CourseProgress {
                    course: CourseSummary {
                        course_id: course.id(),
                        title: course.title().to_owned(),
                    },
                    completion_percentage: stats.completion_percentage(),
                    assignments: stats,
                }
            })
            .collect();

        Ok(MentorDashboard {
            mentor_id: mentor_id.clone(),
            active_students: count(students.len()),
            courses: progress,
            awaiting_review,
        })
    }
}
