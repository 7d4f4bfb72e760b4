//! Repository port for notifications.

use crate::identity::domain::UserId;
use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification persistence contract.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Appends a new notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::DuplicateNotification`] when
    /// the ID is already taken.
    async fn append(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Finds a notification by ID.
    async fn find_notification(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>>;

    /// Persists the read flag of an existing notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] when the
    /// notification does not exist.
    async fn mark_read(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Marks every unread notification of the user read at `read_at` and
    /// returns how many changed.
    async fn mark_all_read(
        &self,
        user_id: &UserId,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<u64>;

    /// Returns the user's notifications, newest first.
    async fn notifications_for(
        &self,
        user_id: &UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Counts the user's unread notifications.
    async fn count_unread(&self, user_id: &UserId) -> NotificationRepositoryResult<u64>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// A notification with the same identifier already exists.
    #[error("duplicate notification identifier: {0}")]
    DuplicateNotification(NotificationId),

    /// The notification does not exist.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// A stored row could not be mapped back to a domain value.
    #[error("invalid persisted notification data: {0}")]
    InvalidPersistedData(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
