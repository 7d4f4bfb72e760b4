//! Sending, listing and acknowledging notifications.

use crate::error::{ClassifyError, ErrorKind};
use crate::identity::domain::{Identity, IdentityDomainError, UserId};
use crate::notification::{
    domain::{Notification, NotificationDomainError, NotificationId, NotificationType},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for sending a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendNotificationRequest {
    user_id: String,
    message: String,
    kind: NotificationType,
    related_id: Option<String>,
}

impl SendNotificationRequest {
    /// Creates a system announcement for `user_id`.
    #[must_use]
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            kind: NotificationType::default(),
            related_id: None,
        }
    }

    /// Sets the notification type.
    #[must_use]
    pub const fn with_kind(mut self, kind: NotificationType) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the related entity identifier.
    #[must_use]
    pub fn with_related_id(mut self, related_id: impl Into<String>) -> Self {
        self.related_id = Some(related_id.into());
        self
    }
}

/// Service-level errors for notification operations.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The recipient ID is malformed or the caller's role is not permitted.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] NotificationDomainError),

    /// The notification does not exist.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// The notification belongs to another user.
    #[error("notification {notification_id} does not belong to {user_id}")]
    NotRecipient {
        /// Notification in question.
        notification_id: NotificationId,
        /// Caller.
        user_id: UserId,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
}

impl ClassifyError for NotificationError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(err) => err.kind(),
            Self::Domain(NotificationDomainError::EmptyMessage) => ErrorKind::InvalidInput,
            Self::Domain(NotificationDomainError::TemplateRender { .. }) => ErrorKind::Internal,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotRecipient { .. } => ErrorKind::Forbidden,
            Self::Repository(err) => err.kind(),
        }
    }
}

impl ClassifyError for NotificationRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateNotification(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for notification service operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Notification inbox service.
#[derive(Clone)]
pub struct NotificationService<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<N>,
    clock: Arc<C>,
}

impl<N, C> NotificationService<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new notification service.
    #[must_use]
    pub const fn new(repository: Arc<N>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a notification for a user.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Identity`] for a blank or malformed user
    /// ID and [`NotificationError::Domain`] for a blank message.
    pub async fn send(&self, request: SendNotificationRequest) -> NotificationResult<Notification> {
        let SendNotificationRequest {
            user_id,
            message,
            kind,
            related_id,
        } = request;
        let recipient = UserId::new(user_id)?;
        let mut notification = Notification::new(recipient, message, kind, &*self.clock)?;
        if let Some(related) = related_id {
            notification = notification.with_related_id(related);
        }
        self.repository.append(&notification).await?;
        Ok(notification)
    }

    /// Sends a notification on behalf of a mentor.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Identity`] when the sender is not a
    /// mentor, otherwise as [`Self::send`].
    pub async fn announce(
        &self,
        sender: &Identity,
        request: SendNotificationRequest,
    ) -> NotificationResult<Notification> {
        let sender_id = sender.require_mentor()?;
        let notification = self.send(request).await?;
        info!(
            sender = %sender_id,
            recipient = %notification.user_id(),
            kind = %notification.kind(),
            "sent announcement"
        );
        Ok(notification)
    }

    /// Marks one of the caller's notifications read.
    ///
    /// Marking an already read notification succeeds without changes.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::NotFound`] when the notification is
    /// absent and [`NotificationError::NotRecipient`] when it belongs to
    /// someone else.
    pub async fn mark_read(
        &self,
        caller: &Identity,
        notification_id: NotificationId,
    ) -> NotificationResult<Notification> {
        let mut notification = self
            .repository
            .find_notification(notification_id)
            .await?
            .ok_or(NotificationError::NotFound(notification_id))?;
        if notification.user_id() != caller.user_id() {
            return Err(NotificationError::NotRecipient {
                notification_id,
                user_id: caller.user_id().clone(),
            });
        }
        if notification.mark_read(&*self.clock) {
            self.repository.mark_read(&notification).await?;
        }
        Ok(notification)
    }

    /// Marks all of the caller's unread notifications read.
    ///
    /// Returns how many notifications changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Repository`] when storage fails.
    pub async fn mark_all_read(&self, caller: &Identity) -> NotificationResult<u64> {
        let updated = self
            .repository
            .mark_all_read(caller.user_id(), self.clock.utc())
            .await?;
        Ok(updated)
    }

    /// Lists the caller's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Repository`] when storage fails.
    pub async fn list(&self, caller: &Identity) -> NotificationResult<Vec<Notification>> {
        Ok(self.repository.notifications_for(caller.user_id()).await?)
    }

    /// Counts the caller's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Repository`] when storage fails.
    pub async fn unread_count(&self, caller: &Identity) -> NotificationResult<u64> {
        Ok(self.repository.count_unread(caller.user_id()).await?)
    }
}
