//! Notification records and lifecycle fan-out.
//!
//! Notifications are append-only apart from their read flag. Lifecycle
//! services describe what happened as a [`domain::LifecycleNotice`]; the
//! [`services::Notifier`] renders it through a `minijinja` template and
//! records it after the lifecycle mutation has committed. A failure to record
//! is logged and never undoes the mutation.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
