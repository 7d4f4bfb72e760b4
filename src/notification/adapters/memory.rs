//! In-memory notification repository.

use crate::identity::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId, PersistedNotificationData},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::store::{InMemoryStore, StoreLockError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

impl From<StoreLockError> for NotificationRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

fn as_read(notification: &Notification, read_at: DateTime<Utc>) -> Notification {
    Notification::from_persisted(PersistedNotificationData {
        id: notification.id(),
        user_id: notification.user_id().clone(),
        message: notification.message().to_owned(),
        kind: notification.kind(),
        related_id: notification.related_id().map(str::to_owned),
        is_read: true,
        created_at: notification.created_at(),
        read_at: Some(read_at),
    })
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn append(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.write()?;
        if state.notifications.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::DuplicateNotification(
                notification.id(),
            ));
        }
        state
            .notifications
            .insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn find_notification(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let state = self.read()?;
        Ok(state.notifications.get(&id).cloned())
    }

    async fn mark_read(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.write()?;
        let Some(stored) = state.notifications.get_mut(&notification.id()) else {
            return Err(NotificationRepositoryError::NotFound(notification.id()));
        };
        *stored = notification.clone();
        Ok(())
    }

    async fn mark_all_read(
        &self,
        user_id: &UserId,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<u64> {
        let mut state = self.write()?;
        let mut updated: u64 = 0;
        for stored in state
            .notifications
            .values_mut()
            .filter(|notification| notification.user_id() == user_id && !notification.is_read())
        {
            *stored = as_read(stored, read_at);
            updated = updated.saturating_add(1);
        }
        Ok(updated)
    }

    async fn notifications_for(
        &self,
        user_id: &UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.read()?;
        let mut notifications: Vec<Notification> = state
            .notifications
            .values()
            .filter(|notification| notification.user_id() == user_id)
            .cloned()
            .collect();
        notifications.sort_by_key(|notification| Reverse(notification.created_at()));
        Ok(notifications)
    }

    async fn count_unread(&self, user_id: &UserId) -> NotificationRepositoryResult<u64> {
        let state = self.read()?;
        let unread = state
            .notifications
            .values()
            .filter(|notification| notification.user_id() == user_id && !notification.is_read())
            .count();
        u64::try_from(unread).map_err(NotificationRepositoryError::persistence)
    }
}
