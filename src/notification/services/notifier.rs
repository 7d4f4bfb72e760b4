//! Best-effort lifecycle notification fan-out.

use super::NotificationResult;
use crate::notification::{
    domain::{LifecycleNotice, Notification, render_message},
    ports::NotificationRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Records lifecycle notices as notifications without failing the caller.
pub struct Notifier<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<N>,
    clock: Arc<C>,
    enabled: bool,
}

impl<N, C> Clone for Notifier<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            enabled: self.enabled,
        }
    }
}

impl<N, C> Notifier<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a notifier. A disabled notifier drops every notice.
    #[must_use]
    pub const fn new(repository: Arc<N>, clock: Arc<C>, enabled: bool) -> Self {
        Self {
            repository,
            clock,
            enabled,
        }
    }

    /// Returns whether notices are recorded.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Renders and records a notice.
    ///
    /// Returns the recorded notification, or `None` when fan-out is disabled
    /// or recording failed. Failures are logged at `warn`.
    pub async fn notify(&self, notice: &LifecycleNotice) -> Option<Notification> {
        if !self.enabled {
            debug!(kind = %notice.kind(), "notification fan-out disabled");
            return None;
        }
        match self.record(notice).await {
            Ok(notification) => Some(notification),
            Err(err) => {
                warn!(
                    recipient = %notice.recipient(),
                    kind = %notice.kind(),
                    error = %err,
                    "failed to record lifecycle notification"
                );
                None
            }
        }
    }

    async fn record(&self, notice: &LifecycleNotice) -> NotificationResult<Notification> {
        let message = render_message(notice)?;
        let mut notification = Notification::new(
            notice.recipient().clone(),
            message,
            notice.kind(),
            &*self.clock,
        )?;
        if let Some(related_id) = notice.related_id() {
            notification = notification.with_related_id(related_id);
        }
        self.repository.append(&notification).await?;
        Ok(notification)
    }
}
