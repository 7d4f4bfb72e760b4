//! Port contracts for user identity storage.

mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
