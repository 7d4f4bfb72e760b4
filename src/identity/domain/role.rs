//! User roles.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Learner who receives tasks and warnings.
    Student,
    /// Mentor who authors tasks, reviews work and issues warnings.
    Mentor,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Mentor => "mentor",
        }
    }

    /// Returns the marker embedded in user IDs for this role.
    #[must_use]
    pub const fn id_marker(self) -> &'static str {
        match self {
            Self::Student => "STD",
            Self::Mentor => "MEN",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "mentor" => Ok(Self::Mentor),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
