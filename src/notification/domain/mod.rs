//! Domain model for notifications.

mod error;
mod ids;
mod notice;
mod notification;
mod templates;

pub use error::{NotificationDomainError, ParseNotificationTypeError};
pub use ids::NotificationId;
pub use notice::LifecycleNotice;
pub use notification::{Notification, NotificationType, PersistedNotificationData};
pub use templates::render_message;
