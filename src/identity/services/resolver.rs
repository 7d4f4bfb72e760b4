//! Credential resolution and user registration.

use crate::error::{ClassifyError, ErrorKind};
use crate::identity::{
    domain::{Cohort, Credential, Identity, IdentityDomainError, Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a user with a chosen ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    user_id: String,
    role: Role,
    credential: String,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: Role, credential: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            credential: credential.into(),
        }
    }
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),

    /// No user is registered under the ID.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// The stored role disagrees with the role implied by the ID prefix.
    #[error("stored role {stored} for {user_id} disagrees with its ID prefix")]
    StoredRoleMismatch {
        /// Affected user.
        user_id: UserId,
        /// Role stored for the user.
        stored: Role,
    },

    /// The credential does not match.
    #[error("invalid credential for {0}")]
    InvalidCredential(UserId),

    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl ClassifyError for IdentityError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::UnknownUser(_) => ErrorKind::NotFound,
            Self::StoredRoleMismatch { .. } => ErrorKind::Conflict,
            Self::InvalidCredential(_) => ErrorKind::Forbidden,
            Self::Directory(err) => err.kind(),
        }
    }
}

impl ClassifyError for IdentityDomainError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::RoleNotPermitted { .. } => ErrorKind::Forbidden,
            Self::EmptyUserId
            | Self::InvalidUserId(_)
            | Self::UnknownRolePrefix(_)
            | Self::RolePrefixMismatch { .. }
            | Self::InvalidCohort(_)
            | Self::EmptyCredential => ErrorKind::InvalidInput,
        }
    }
}

impl ClassifyError for UserDirectoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateUser(_) => ErrorKind::Conflict,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for identity service operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity resolution service.
#[derive(Clone)]
pub struct IdentityResolver<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> IdentityResolver<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new identity resolver.
    #[must_use]
    pub const fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        Self { directory, clock }
    }

    /// Registers a user under an explicit ID.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Domain`] when the ID or credential is
    /// malformed or the ID prefix disagrees with the role, and
    /// [`IdentityError::Directory`] when the ID is taken or storage fails.
    pub async fn register(&self, request: RegisterUserRequest) -> IdentityResult<User> {
        let user_id = UserId::new(request.user_id)?;
        let credential = Credential::new(request.credential)?;
        let user = User::new(user_id, request.role, credential, &*self.clock)?;
        self.directory.register(&user).await?;
        info!(user_id = %user.user_id(), role = %user.role(), "registered user");
        Ok(user)
    }

    /// Resolves a login credential to an authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Domain`] for malformed IDs or IDs without a
    /// role marker, [`IdentityError::UnknownUser`] when nobody holds the ID,
    /// [`IdentityError::StoredRoleMismatch`] when the stored role disagrees
    /// with the prefix, and [`IdentityError::InvalidCredential`] when the
    /// credential is wrong.
    pub async fn resolve(&self, user_id: &str, credential: &str) -> IdentityResult<Identity> {
        let parsed = UserId::new(user_id)?;
        let implied = parsed.implied_role()?;
        let user = self
            .directory
            .find_user(&parsed)
            .await?
            .ok_or_else(|| IdentityError::UnknownUser(parsed.clone()))?;

        if user.role() != implied {
            return Err(IdentityError::StoredRoleMismatch {
                user_id: parsed,
                stored: user.role(),
            });
        }
        if !user.verify(credential) {
            return Err(IdentityError::InvalidCredential(parsed));
        }
        Ok(user.identity())
    }

    /// Allocates the next free ID for `role` in `cohort`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Directory`] when the directory lookup fails.
    pub async fn allocate_user_id(&self, role: Role, cohort: Cohort) -> IdentityResult<UserId> {
        next_user_id(&*self.directory, role, cohort)
            .await
            .map_err(IdentityError::from)
    }
}

/// Returns one past the highest allocated ID for `role` in `cohort`.
pub(crate) async fn next_user_id<D>(
    directory: &D,
    role: Role,
    cohort: Cohort,
) -> Result<UserId, UserDirectoryError>
where
    D: UserDirectory + ?Sized,
{
    let prefix = UserId::prefix(role, cohort);
    let highest = directory.highest_sequence(&prefix).await?;
    let next = highest.map_or(1, |sequence| sequence.saturating_add(1));
    Ok(UserId::allocate(role, cohort, next))
}
