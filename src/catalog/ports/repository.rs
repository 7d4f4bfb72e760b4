//! Repository port for courses and tasks.

use crate::catalog::domain::{CatalogEntry, Course, CourseId, Task, TaskId};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog repository operations.
pub type CatalogRepositoryResult<T> = Result<T, CatalogRepositoryError>;

/// Catalog persistence contract.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Stores a new course.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::DuplicateCourse`] when the ID is
    /// already taken.
    async fn store_course(&self, course: &Course) -> CatalogRepositoryResult<()>;

    /// Finds a course by ID.
    async fn find_course(&self, id: CourseId) -> CatalogRepositoryResult<Option<Course>>;

    /// Returns the mentor's courses, newest first.
    async fn courses_for_mentor(&self, mentor_id: &UserId) -> CatalogRepositoryResult<Vec<Course>>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::CourseNotFound`] when the task's
    /// course does not exist.
    async fn store_task(&self, task: &Task) -> CatalogRepositoryResult<()>;

    /// Persists edits to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn update_task(&self, task: &Task) -> CatalogRepositoryResult<()>;

    /// Finds a task together with its course.
    async fn find_entry(&self, id: TaskId) -> CatalogRepositoryResult<Option<CatalogEntry>>;

    /// Returns the entries for the given tasks, skipping unknown IDs.
    async fn find_entries(&self, ids: &[TaskId]) -> CatalogRepositoryResult<Vec<CatalogEntry>>;

    /// Returns every task in the mentor's courses, newest first.
    async fn entries_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> CatalogRepositoryResult<Vec<CatalogEntry>>;
}

/// Errors returned by catalog repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogRepositoryError {
    /// A course with the same identifier already exists.
    #[error("duplicate course identifier: {0}")]
    DuplicateCourse(CourseId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The course does not exist.
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A stored row could not be mapped back to a domain value.
    #[error("invalid persisted catalog data: {0}")]
    InvalidPersistedData(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
