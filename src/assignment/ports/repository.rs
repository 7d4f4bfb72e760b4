//! Repository port for task assignments.

use crate::assignment::domain::{AssignmentId, AssignmentStatus, TaskAssignment};
use crate::catalog::domain::TaskId;
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignment repository operations.
pub type AssignmentRepositoryResult<T> = Result<T, AssignmentRepositoryError>;

/// Assignment persistence contract.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Stores a new assignment.
    ///
    /// The duplicate check and the insert form one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::DuplicateAssignment`] when the
    /// task is already assigned to the student.
    async fn insert(&self, assignment: &TaskAssignment) -> AssignmentRepositoryResult<()>;

    /// Persists a transitioned assignment if its stored status still equals
    /// `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::NotFound`] when the assignment is
    /// gone and [`AssignmentRepositoryError::StaleAssignment`] when its status
    /// changed concurrently.
    async fn update(
        &self,
        assignment: &TaskAssignment,
        expected: AssignmentStatus,
    ) -> AssignmentRepositoryResult<()>;

    /// Finds an assignment by ID.
    async fn find_by_id(&self, id: AssignmentId)
    -> AssignmentRepositoryResult<Option<TaskAssignment>>;

    /// Finds the assignment of `task_id` to `student_id`.
    async fn find_by_pair(
        &self,
        task_id: TaskId,
        student_id: &UserId,
    ) -> AssignmentRepositoryResult<Option<TaskAssignment>>;

    /// Returns the student's assignments, newest submission first.
    async fn list_for_student(
        &self,
        student_id: &UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskAssignment>>;

    /// Returns assignments on tasks in the mentor's courses, newest
    /// submission first.
    async fn list_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskAssignment>>;
}

/// Errors returned by assignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssignmentRepositoryError {
    /// The task is already assigned to the student.
    #[error("task {task_id} is already assigned to {student_id}")]
    DuplicateAssignment {
        /// Assigned task.
        task_id: TaskId,
        /// Assigned student.
        student_id: UserId,
    },

    /// The assignment does not exist.
    #[error("assignment not found: {0}")]
    NotFound(AssignmentId),

    /// The stored status no longer matches the transition's starting point.
    #[error("assignment {id} is no longer {expected}")]
    StaleAssignment {
        /// Assignment in question.
        id: AssignmentId,
        /// Status the update expected to find.
        expected: AssignmentStatus,
    },

    /// A stored row could not be mapped back to a domain value.
    #[error("invalid persisted assignment data: {0}")]
    InvalidPersistedData(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssignmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
