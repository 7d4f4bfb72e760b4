//! Service wiring over a single injected store.
//!
//! [`Platform`] is the composition root used by hosts and integration tests.
//! Every lifecycle service shares the same `Arc<S>` and clock, so a mentor's
//! action in one service is immediately visible to the others.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::{
    assignment::services::AssignmentLifecycleService,
    catalog::services::TaskCatalogService,
    config::MentorshipConfig,
    dashboard::services::DashboardService,
    error::{ClassifyError, ClientError},
    identity::services::IdentityResolver,
    notification::services::NotificationService,
    roster::services::RosterService,
    store::{InMemoryStore, MentorshipStore},
    warning::services::WarningLifecycleService,
};

/// Every lifecycle service bound to one store.
#[derive(Clone)]
pub struct Platform<S, C = DefaultClock>
where
    S: MentorshipStore,
    C: Clock + Send + Sync + 'static,
{
    config: MentorshipConfig,
    store: Arc<S>,
    identity: IdentityResolver<S, C>,
    roster: RosterService<S, S, C>,
    catalog: TaskCatalogService<S, C>,
    assignments: AssignmentLifecycleService<S, C>,
    warnings: WarningLifecycleService<S, C>,
    notifications: NotificationService<S, C>,
    dashboards: DashboardService<S>,
}

impl Platform<InMemoryStore> {
    /// Builds a platform over a fresh in-memory store and the system clock.
    #[must_use]
    pub fn in_memory(config: MentorshipConfig) -> Self {
        Self::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(DefaultClock),
            config,
        )
    }
}

impl<S, C> Platform<S, C>
where
    S: MentorshipStore,
    C: Clock + Send + Sync + 'static,
{
    /// Wires every service over `store` and `clock`.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, config: MentorshipConfig) -> Self {
        let notifications_enabled = config.notifications_enabled();
        Self {
            identity: IdentityResolver::new(Arc::clone(&store), Arc::clone(&clock)),
            roster: RosterService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&clock),
                config.cohort(),
            ),
            catalog: TaskCatalogService::new(Arc::clone(&store), Arc::clone(&clock))
                .with_notifications(notifications_enabled),
            assignments: AssignmentLifecycleService::new(Arc::clone(&store), Arc::clone(&clock))
                .with_review_policy(config.review_policy())
                .with_notifications(notifications_enabled),
            warnings: WarningLifecycleService::new(Arc::clone(&store), Arc::clone(&clock))
                .with_notifications(notifications_enabled),
            notifications: NotificationService::new(Arc::clone(&store), clock),
            dashboards: DashboardService::new(Arc::clone(&store)),
            store,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &MentorshipConfig {
        &self.config
    }

    /// Returns the shared store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the identity resolver.
    #[must_use]
    pub const fn identity(&self) -> &IdentityResolver<S, C> {
        &self.identity
    }

    /// Returns the roster service.
    #[must_use]
    pub const fn roster(&self) -> &RosterService<S, S, C> {
        &self.roster
    }

    /// Returns the task catalog service.
    #[must_use]
    pub const fn catalog(&self) -> &TaskCatalogService<S, C> {
        &self.catalog
    }

    /// Returns the assignment lifecycle service.
    #[must_use]
    pub const fn assignments(&self) -> &AssignmentLifecycleService<S, C> {
        &self.assignments
    }

    /// Returns the warning lifecycle service.
    #[must_use]
    pub const fn warnings(&self) -> &WarningLifecycleService<S, C> {
        &self.warnings
    }

    /// Returns the notification inbox service.
    #[must_use]
    pub const fn notifications(&self) -> &NotificationService<S, C> {
        &self.notifications
    }

    /// Returns the dashboard service.
    #[must_use]
    pub const fn dashboards(&self) -> &DashboardService<S> {
        &self.dashboards
    }

    /// Projects a service error into a client payload using the configured
    /// detail level.
    #[must_use]
    pub fn client_error(&self, error: &impl ClassifyError) -> ClientError {
        ClientError::from_error(error, self.config.error_detail())
    }
}
