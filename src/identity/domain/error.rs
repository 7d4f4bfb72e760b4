//! Error types for identity validation and parsing.

use super::{Role, UserId};
use thiserror::Error;

/// Errors returned while constructing or checking identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user ID is empty after trimming.
    #[error("user ID must not be empty")]
    EmptyUserId,

    /// The user ID contains unsupported characters or is too long.
    #[error("invalid user ID '{0}', expected up to 32 ASCII letters and digits")]
    InvalidUserId(String),

    /// The user ID carries neither the student nor the mentor marker.
    #[error("user ID '{0}' has no recognised role prefix")]
    UnknownRolePrefix(UserId),

    /// The user ID prefix disagrees with the requested role.
    #[error("user ID '{user_id}' does not carry the {role} prefix")]
    RolePrefixMismatch {
        /// Offending user ID.
        user_id: UserId,
        /// Role that was requested.
        role: Role,
    },

    /// The cohort number does not fit in two digits.
    #[error("invalid cohort {0}, expected 0-99")]
    InvalidCohort(u8),

    /// The credential is empty.
    #[error("credential must not be empty")]
    EmptyCredential,

    /// The caller's role is not permitted on this surface.
    #[error("{user_id} is a {actual} but this action requires a {required}")]
    RoleNotPermitted {
        /// Caller.
        user_id: UserId,
        /// Caller's role.
        actual: Role,
        /// Role the surface requires.
        required: Role,
    },
}

/// Error returned while parsing roles from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
