//! `PostgreSQL` notification repository implementation.

use super::models::NotificationRow;
use crate::identity::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId, NotificationType, PersistedNotificationData},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::store::postgres::{PostgresStore, StoreAccessError, schema::notifications};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl From<StoreAccessError> for NotificationRepositoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for NotificationRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl NotificationRepository for PostgresStore {
    async fn append(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let id = notification.id();
        let row = notification_to_row(notification);
        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationRepositoryError::DuplicateNotification(id)
                    }
                    _ => NotificationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_notification(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        self.run_blocking(move |connection| {
            let row = notifications::table
                .filter(notifications::id.eq(id.into_inner()))
                .select(NotificationRow::as_select())
                .first::<NotificationRow>(connection)
                .optional()?;
            row.map(row_to_notification).transpose()
        })
        .await
    }

    async fn mark_read(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let id = notification.id();
        let is_read = notification.is_read();
        let read_at = notification.read_at();
        self.run_blocking(move |connection| {
            let updated =
                diesel::update(notifications::table.filter(notifications::id.eq(id.into_inner())))
                    .set((
                        notifications::is_read.eq(is_read),
                        notifications::read_at.eq(read_at),
                    ))
                    .execute(connection)?;
            if updated == 0 {
                return Err(NotificationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn mark_all_read(
        &self,
        user_id: &UserId,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<u64> {
        let user = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                notifications::table
                    .filter(notifications::user_id.eq(user))
                    .filter(notifications::is_read.eq(false)),
            )
            .set((
                notifications::is_read.eq(true),
                notifications::read_at.eq(Some(read_at)),
            ))
            .execute(connection)?;
            u64::try_from(updated).map_err(NotificationRepositoryError::persistence)
        })
        .await
    }

    async fn notifications_for(
        &self,
        user_id: &UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let user = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = notifications::table
                .filter(notifications::user_id.eq(user))
                .order(notifications::created_at.desc())
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(connection)?;
            rows.into_iter().map(row_to_notification).collect()
        })
        .await
    }

    async fn count_unread(&self, user_id: &UserId) -> NotificationRepositoryResult<u64> {
        let user = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let unread: i64 = notifications::table
                .filter(notifications::user_id.eq(user))
                .filter(notifications::is_read.eq(false))
                .count()
                .get_result(connection)?;
            u64::try_from(unread).map_err(NotificationRepositoryError::persistence)
        })
        .await
    }
}

fn notification_to_row(notification: &Notification) -> NotificationRow {
    NotificationRow {
        id: notification.id().into_inner(),
        user_id: notification.user_id().as_str().to_owned(),
        message: notification.message().to_owned(),
        kind: notification.kind().as_str().to_owned(),
        related_id: notification.related_id().map(str::to_owned),
        is_read: notification.is_read(),
        created_at: notification.created_at(),
        read_at: notification.read_at(),
    }
}

fn row_to_notification(row: NotificationRow) -> NotificationRepositoryResult<Notification> {
    let user_id = UserId::new(row.user_id)
        .map_err(|err| NotificationRepositoryError::InvalidPersistedData(err.to_string()))?;
    let kind = NotificationType::try_from(row.kind.as_str())
        .map_err(|err| NotificationRepositoryError::InvalidPersistedData(err.to_string()))?;
    Ok(Notification::from_persisted(PersistedNotificationData {
        id: NotificationId::from_uuid(row.id),
        user_id,
        message: row.message,
        kind,
        related_id: row.related_id,
        is_read: row.is_read,
        created_at: row.created_at,
        read_at: row.read_at,
    }))
}
