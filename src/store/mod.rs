//! Store handles shared by every lifecycle module.
//!
//! A single store value implements all repository ports, which lets the
//! [`crate::platform::Platform`] wire every service over one injected
//! `Arc<S>`. Two stores are provided:
//!
//! - [`memory::InMemoryStore`]: lock-guarded maps for tests and embedding
//! - [`postgres::PostgresStore`]: Diesel over an r2d2 connection pool

pub mod memory;
pub mod postgres;

use crate::{
    assignment::ports::AssignmentRepository, catalog::ports::CatalogRepository,
    identity::ports::UserDirectory, notification::ports::NotificationRepository,
    roster::ports::RosterRepository, warning::ports::WarningRepository,
};

/// Umbrella contract for a store backing every lifecycle port.
pub trait MentorshipStore:
    UserDirectory
    + RosterRepository
    + CatalogRepository
    + AssignmentRepository
    + WarningRepository
    + NotificationRepository
    + 'static
{
}

impl<S> MentorshipStore for S where
    S: UserDirectory
        + RosterRepository
        + CatalogRepository
        + AssignmentRepository
        + WarningRepository
        + NotificationRepository
        + 'static
{
}

pub use memory::{InMemoryStore, StoreLockError};
pub use postgres::{PgPool, PostgresStore, StoreAccessError};
