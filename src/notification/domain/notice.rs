//! Lifecycle events awaiting delivery as notifications.

use super::NotificationType;
use crate::identity::domain::UserId;
use serde_json::{Map, Value};

/// Description of a lifecycle event that warrants alerting one user.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleNotice {
    recipient: UserId,
    kind: NotificationType,
    related_id: Option<String>,
    context: Map<String, Value>,
}

impl LifecycleNotice {
    /// Creates a notice with an empty template context.
    #[must_use]
    pub fn new(recipient: UserId, kind: NotificationType) -> Self {
        Self {
            recipient,
            kind,
            related_id: None,
            context: Map::new(),
        }
    }

    /// Records the entity the notice is about.
    #[must_use]
    pub fn related_to(mut self, related_id: impl ToString) -> Self {
        self.related_id = Some(related_id.to_string());
        self
    }

    /// Adds a template variable.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.context.insert(key.to_owned(), value.into());
        self
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> &UserId {
        &self.recipient
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

    /// Returns the template context.
    #[must_use]
    pub const fn context(&self) -> &Map<String, Value> {
        &self.context
    }
}
