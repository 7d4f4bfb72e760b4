//! User aggregate, credentials and authenticated identities.

use super::{IdentityDomainError, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::fmt;

/// Opaque login credential.
///
/// The value is never rendered by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Creates a credential.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyCredential`] when the value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let secret = value.into();
        if secret.is_empty() {
            return Err(IdentityDomainError::EmptyCredential);
        }
        Ok(Self(secret))
    }

    /// Returns whether `candidate` matches this credential.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Returns the raw credential for persistence.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    user_id: UserId,
    role: Role,
    credential: Credential,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub user_id: UserId,
    /// Persisted role.
    pub role: Role,
    /// Persisted credential.
    pub credential: Credential,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user whose ID prefix agrees with `role`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::UnknownRolePrefix`] when the ID has no
    /// role marker, or [`IdentityDomainError::RolePrefixMismatch`] when the
    /// marker belongs to the other role.
    pub fn new(
        user_id: UserId,
        role: Role,
        credential: Credential,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        if user_id.implied_role()? != role {
            return Err(IdentityDomainError::RolePrefixMismatch { user_id, role });
        }
        Ok(Self {
            user_id,
            role,
            credential,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            user_id: data.user_id,
            role: data.role,
            credential: data.credential,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the stored role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the credential.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether `candidate` is this user's credential.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        self.credential.matches(candidate)
    }

    /// Returns the authenticated identity for this user.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id.clone(), self.role)
    }
}

/// Authenticated caller carried by every service call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    user_id: UserId,
    role: Role,
}

impl Identity {
    /// Creates an identity.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the caller's user ID.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Checks that the caller holds `required`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::RoleNotPermitted`] on mismatch.
    pub fn require(&self, required: Role) -> Result<&UserId, IdentityDomainError> {
        if self.role != required {
            return Err(IdentityDomainError::RoleNotPermitted {
                user_id: self.user_id.clone(),
                actual: self.role,
                required,
            });
        }
        Ok(&self.user_id)
    }

    /// Checks that the caller is a mentor.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::RoleNotPermitted`] for students.
    pub fn require_mentor(&self) -> Result<&UserId, IdentityDomainError> {
        self.require(Role::Mentor)
    }

    /// Checks that the caller is a student.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::RoleNotPermitted`] for mentors.
    pub fn require_student(&self) -> Result<&UserId, IdentityDomainError> {
        self.require(Role::Student)
    }
}
