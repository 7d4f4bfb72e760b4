//! Repository port for links and student profiles.

use crate::identity::domain::UserId;
use crate::roster::domain::{Enrollment, MentorStudentLink, StudentProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for roster repository operations.
pub type RosterRepositoryResult<T> = Result<T, RosterRepositoryError>;

/// Roster persistence contract.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Stores a new student's user, profile and link as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::DuplicateStudent`] when the student
    /// ID is already registered.
    async fn enroll(&self, enrollment: &Enrollment) -> RosterRepositoryResult<()>;

    /// Stores a new link.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::DuplicateLink`] when the pair is
    /// already linked.
    async fn store_link(&self, link: &MentorStudentLink) -> RosterRepositoryResult<()>;

    /// Persists an activation change on an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::LinkNotFound`] when the pair has no
    /// link.
    async fn update_link(&self, link: &MentorStudentLink) -> RosterRepositoryResult<()>;

    /// Finds the link for a mentor-student pair, active or not.
    async fn find_link(
        &self,
        mentor_id: &UserId,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Option<MentorStudentLink>>;

    /// Returns profiles of students actively linked to the mentor, ordered
    /// by student ID.
    async fn active_students(&self, mentor_id: &UserId)
    -> RosterRepositoryResult<Vec<StudentProfile>>;

    /// Returns the student's active links.
    async fn active_links_for_student(
        &self,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Vec<MentorStudentLink>>;

    /// Finds a student profile.
    async fn find_profile(
        &self,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Option<StudentProfile>>;

    /// Persists profile edits.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::StudentNotFound`] when the profile is
    /// absent.
    async fn update_profile(&self, profile: &StudentProfile) -> RosterRepositoryResult<()>;

    /// Deletes a student together with their links, assignments, warnings
    /// and notifications.
    ///
    /// # Errors
    ///
    /// Returns [`RosterRepositoryError::StudentNotFound`] when the student is
    /// absent.
    async fn remove_student(&self, student_id: &UserId) -> RosterRepositoryResult<()>;
}

/// Errors returned by roster repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RosterRepositoryError {
    /// The student ID is already registered.
    #[error("duplicate student identifier: {0}")]
    DuplicateStudent(UserId),

    /// The pair is already linked.
    #[error("{mentor_id} is already linked to {student_id}")]
    DuplicateLink {
        /// Mentor side.
        mentor_id: UserId,
        /// Student side.
        student_id: UserId,
    },

    /// The pair has no link.
    #[error("no link between {mentor_id} and {student_id}")]
    LinkNotFound {
        /// Mentor side.
        mentor_id: UserId,
        /// Student side.
        student_id: UserId,
    },

    /// The student profile does not exist.
    #[error("student not found: {0}")]
    StudentNotFound(UserId),

    /// A stored row could not be mapped back to a domain value.
    #[error("invalid persisted roster data: {0}")]
    InvalidPersistedData(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RosterRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
