//! Identifier for notifications.

use crate::ids::uuid_identifier;

uuid_identifier!(
    /// Unique identifier for a notification.
    NotificationId
);
