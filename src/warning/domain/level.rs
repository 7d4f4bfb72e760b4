//! Warning severity levels, statuses and the transition table.

use super::{ParseWarningLevelError, ParseWarningStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a warning, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    /// Minor concern.
    Low,
    /// Noticeable concern.
    Medium,
    /// Serious concern.
    High,
    /// Grounds for removal from the programme.
    Critical,
}

impl WarningLevel {
    /// Every level, least severe first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl TryFrom<&str> for WarningLevel {
    type Error = ParseWarningLevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseWarningLevelError(value.to_owned())),
        }
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningStatus {
    /// Outstanding.
    Active,
    /// Acknowledged by the student. Terminal.
    Resolved,
}

impl WarningStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        }
    }

    /// Returns the status reached by applying `event`, or `None` when the
    /// move is not allowed.
    #[must_use]
    pub const fn apply(self, event: WarningEvent) -> Option<Self> {
        match (self, event) {
            (Self::Active, WarningEvent::Resolve) => Some(Self::Resolved),
            (Self::Resolved, WarningEvent::Resolve) => None,
        }
    }
}

impl TryFrom<&str> for WarningStatus {
    type Error = ParseWarningStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseWarningStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for WarningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event driving a warning transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningEvent {
    /// The student acknowledges the warning.
    Resolve,
}

impl fmt::Display for WarningEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve => f.write_str("resolve"),
        }
    }
}
