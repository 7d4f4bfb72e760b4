//! Service orchestration for notifications.

mod inbox;
mod notifier;

pub use inbox::{
    NotificationError, NotificationResult, NotificationService, SendNotificationRequest,
};
pub use notifier::Notifier;
