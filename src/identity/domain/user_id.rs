//! Cohort-prefixed user identifiers.

use super::{IdentityDomainError, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_USER_ID_LENGTH: usize = 32;

/// Two-digit intake cohort that prefixes allocated user IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cohort(u8);

impl Cohort {
    /// Cohort used when none is configured.
    pub const DEFAULT: Self = Self(26);

    /// Creates a validated cohort.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidCohort`] when `value` exceeds 99.
    pub const fn new(value: u8) -> Result<Self, IdentityDomainError> {
        if value > 99 {
            return Err(IdentityDomainError::InvalidCohort(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric cohort.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Cohort {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Cohort {
    type Error = IdentityDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cohort> for u8 {
    fn from(cohort: Cohort) -> Self {
        cohort.0
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Validated, upper-cased user identifier such as `26STD0001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user ID.
    ///
    /// Surrounding whitespace is trimmed and letters are upper-cased.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyUserId`] when the value is blank
    /// or [`IdentityDomainError::InvalidUserId`] when it is too long or holds
    /// anything other than ASCII letters and digits.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyUserId);
        }
        let well_formed = normalized.len() <= MAX_USER_ID_LENGTH
            && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !well_formed {
            return Err(IdentityDomainError::InvalidUserId(raw));
        }
        Ok(Self(normalized))
    }

    /// Builds the ID for the `sequence`-th user of `role` in `cohort`.
    #[must_use]
    pub fn allocate(role: Role, cohort: Cohort, sequence: u32) -> Self {
        Self(format!("{}{sequence:04}", Self::prefix(role, cohort)))
    }

    /// Returns the shared prefix of IDs allocated for `role` in `cohort`.
    #[must_use]
    pub fn prefix(role: Role, cohort: Cohort) -> String {
        format!("{cohort}{}", role.id_marker())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the role from the ID's marker, ignoring any cohort digits.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::UnknownRolePrefix`] when neither marker
    /// follows the cohort digits.
    pub fn implied_role(&self) -> Result<Role, IdentityDomainError> {
        let marked = self.without_cohort();
        [Role::Student, Role::Mentor]
            .into_iter()
            .find(|role| marked.starts_with(role.id_marker()))
            .ok_or_else(|| IdentityDomainError::UnknownRolePrefix(self.clone()))
    }

    /// Returns the numeric sequence after the role marker, if any.
    #[must_use]
    pub fn sequence(&self) -> Option<u32> {
        let role = self.implied_role().ok()?;
        self.without_cohort()
            .strip_prefix(role.id_marker())?
            .parse()
            .ok()
    }

    fn without_cohort(&self) -> &str {
        self.0.trim_start_matches(|ch: char| ch.is_ascii_digit())
    }
}

impl TryFrom<String> for UserId {
    type Error = IdentityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(user_id: UserId) -> Self {
        user_id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
