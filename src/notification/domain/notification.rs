//! Notification records.

use super::{NotificationDomainError, NotificationId, ParseNotificationTypeError};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason a notification was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// A mentor assigned a task to the student.
    TaskAssigned,
    /// A mentor reviewed the student's submission.
    TaskReviewed,
    /// A mentor issued a warning to the student.
    WarningIssued,
    /// A mentor published a course.
    CourseCreated,
    /// Free-form message from a mentor.
    #[default]
    SystemAnnouncement,
}

impl NotificationType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskReviewed => "task_reviewed",
            Self::WarningIssued => "warning_issued",
            Self::CourseCreated => "course_created",
            Self::SystemAnnouncement => "system_announcement",
        }
    }
}

impl TryFrom<&str> for NotificationType {
    type Error = ParseNotificationTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "task_assigned" => Ok(Self::TaskAssigned),
            "task_reviewed" => Ok(Self::TaskReviewed),
            "warning_issued" => Ok(Self::WarningIssued),
            "course_created" => Ok(Self::CourseCreated),
            "system_announcement" => Ok(Self::SystemAnnouncement),
            _ => Err(ParseNotificationTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message delivered to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    message: String,
    kind: NotificationType,
    related_id: Option<String>,
    is_read: bool,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted identifier.
    pub id: NotificationId,
    /// Persisted recipient.
    pub user_id: UserId,
    /// Persisted message.
    pub message: String,
    /// Persisted type.
    pub kind: NotificationType,
    /// Persisted related entity.
    pub related_id: Option<String>,
    /// Persisted read flag.
    pub is_read: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted read timestamp.
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Creates an unread notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError::EmptyMessage`] for a blank message.
    pub fn new(
        user_id: UserId,
        message: impl Into<String>,
        kind: NotificationType,
        clock: &impl Clock,
    ) -> Result<Self, NotificationDomainError> {
        let text = message.into();
        if text.trim().is_empty() {
            return Err(NotificationDomainError::EmptyMessage);
        }
        Ok(Self {
            id: NotificationId::new(),
            user_id,
            message: text,
            kind,
            related_id: None,
            is_read: false,
            created_at: clock.utc(),
            read_at: None,
        })
    }

    /// Attaches the identifier of the entity the notification is about.
    #[must_use]
    pub fn with_related_id(mut self, related_id: impl Into<String>) -> Self {
        self.related_id = Some(related_id.into());
        self
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            message: data.message,
            kind: data.kind,
            related_id: data.related_id,
            is_read: data.is_read,
            created_at: data.created_at,
            read_at: data.read_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the notification type.
    #[must_use]
    pub const fn kind(&self) -> NotificationType {
        self.kind
    }

    /// Returns the related entity identifier, if any.
    #[must_use]
    pub fn related_id(&self) -> Option<&str> {
        self.related_id.as_deref()
    }

    /// Returns whether the notification has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the notification was read.
    #[must_use]
    pub const fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    /// Marks the notification read. Returns `false` when it already was.
    pub fn mark_read(&mut self, clock: &impl Clock) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(clock.utc());
        true
    }
}
