//! Port contracts for warning persistence.

mod repository;

pub use repository::{WarningRepository, WarningRepositoryError, WarningRepositoryResult};
