//! Error types for notification validation.

use super::NotificationType;
use thiserror::Error;

/// Errors returned while constructing notifications.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationDomainError {
    /// The message is empty after trimming.
    #[error("notification message must not be empty")]
    EmptyMessage,

    /// The message template failed to render.
    #[error("failed to render {kind} message: {reason}")]
    TemplateRender {
        /// Notification type being rendered.
        kind: NotificationType,
        /// Renderer diagnostic.
        reason: String,
    },
}

/// Error returned while parsing notification types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown notification type: {0}")]
pub struct ParseNotificationTypeError(pub String);
