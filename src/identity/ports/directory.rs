//! Directory port for registered users.

use crate::identity::domain::{User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateUser`] when the user ID is
    /// already taken.
    async fn register(&self, user: &User) -> UserDirectoryResult<()>;

    /// Finds a user by ID.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_user(&self, user_id: &UserId) -> UserDirectoryResult<Option<User>>;

    /// Returns the highest numeric sequence among IDs starting with `prefix`.
    ///
    /// Returns `None` when no ID carries the prefix.
    async fn highest_sequence(&self, prefix: &str) -> UserDirectoryResult<Option<u32>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// A user with the same ID already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A stored row could not be mapped back to a user.
    #[error("invalid persisted user data: {0}")]
    InvalidPersistedData(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
