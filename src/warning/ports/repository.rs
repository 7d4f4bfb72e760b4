//! Repository port for warnings.

use crate::identity::domain::UserId;
use crate::warning::domain::{Warning, WarningId, WarningStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for warning repository operations.
pub type WarningRepositoryResult<T> = Result<T, WarningRepositoryError>;

/// Warning persistence contract.
#[async_trait]
pub trait WarningRepository: Send + Sync {
    /// Stores a new warning and increments the student's warning counter in
    /// one atomic step. Returns the new counter value.
    ///
    /// # Errors
    ///
    /// Returns [`WarningRepositoryError::StudentNotFound`] when the student
    /// has no profile and [`WarningRepositoryError::DuplicateWarning`] when
    /// the ID is taken. Neither the warning nor the counter change then.
    async fn issue_warning(&self, warning: &Warning) -> WarningRepositoryResult<u32>;

    /// Persists a transitioned warning if its stored status still equals
    /// `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`WarningRepositoryError::NotFound`] when the warning is gone
    /// and [`WarningRepositoryError::StaleWarning`] when its status changed
    /// concurrently.
    async fn update_warning(
        &self,
        warning: &Warning,
        expected: WarningStatus,
    ) -> WarningRepositoryResult<()>;

    /// Finds a warning by ID.
    async fn find_warning(&self, id: WarningId) -> WarningRepositoryResult<Option<Warning>>;

    /// Returns the student's warnings, newest first.
    async fn warnings_for_student(
        &self,
        student_id: &UserId,
    ) -> WarningRepositoryResult<Vec<Warning>>;

    /// Returns warnings the mentor issued, newest first.
    async fn warnings_for_mentor(&self, mentor_id: &UserId)
    -> WarningRepositoryResult<Vec<Warning>>;
}

/// Errors returned by warning repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WarningRepositoryError {
    /// A warning with the same identifier already exists.
    #[error("duplicate warning identifier: {0}")]
    DuplicateWarning(WarningId),

    /// The warned student has no profile.
    #[error("student not found: {0}")]
    StudentNotFound(UserId),

    /// The warning does not exist.
    #[error("warning not found: {0}")]
    NotFound(WarningId),

    /// The stored status no longer matches the transition's starting point.
    #[error("warning {id} is no longer {expected}")]
    StaleWarning {
        /// Warning in question.
        id: WarningId,
        /// Status the update expected to find.
        expected: WarningStatus,
    },

    /// A stored row could not be mapped back to a domain value.
    #[error("invalid persisted warning data: {0}")]
    InvalidPersistedData(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WarningRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
