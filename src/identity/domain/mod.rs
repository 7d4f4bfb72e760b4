//! Domain model for user identity.

mod error;
mod role;
mod user;
mod user_id;

pub use error::{IdentityDomainError, ParseRoleError};
pub use role::Role;
pub use user::{Credential, Identity, PersistedUserData, User};
pub use user_id::{Cohort, UserId};
