//! Port contracts for roster persistence.

mod repository;

pub use repository::{RosterRepository, RosterRepositoryError, RosterRepositoryResult};
