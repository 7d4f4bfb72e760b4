//! Diesel row models for notifications.

use crate::store::postgres::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for notifications.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Recipient.
    pub user_id: String,
    /// Rendered message.
    pub message: String,
    /// Notification type.
    pub kind: String,
    /// Related entity identifier.
    pub related_id: Option<String>,
    /// Read flag.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Read timestamp.
    pub read_at: Option<DateTime<Utc>>,
}
