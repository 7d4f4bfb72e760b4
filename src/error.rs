//! Client-facing error taxonomy shared by every lifecycle service.
//!
//! Each component keeps its own `thiserror` enums. Service errors implement
//! [`ClassifyError`] so that callers can map any failure onto one stable
//! [`ErrorKind`] and project it into a [`ClientError`] without leaking store
//! diagnostics.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Message returned for internal failures when detail is redacted.
const INTERNAL_MESSAGE: &str = "an internal error occurred";

/// Stable, programmatic classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is missing or malformed, or an enum value is unknown.
    InvalidInput,
    /// A referenced task, assignment, warning, user or notification is absent.
    NotFound,
    /// The caller lacks the role, ownership or active roster link required.
    Forbidden,
    /// The request collides with current state (duplicates, terminal states).
    Conflict,
    /// The underlying store failed unexpectedly.
    Internal,
}

impl ErrorKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }

    /// Returns whether the kind describes a business-rule outcome rather than
    /// an infrastructure failure.
    #[must_use]
    pub const fn is_business(self) -> bool {
        !matches!(self, Self::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an error onto the shared taxonomy.
pub trait ClassifyError: std::error::Error {
    /// Returns the stable kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// How much detail internal failures expose to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorDetail {
    /// Internal failures carry a fixed generic message.
    #[default]
    Redacted,
    /// Internal failures carry their full display message.
    Verbose,
}

impl ErrorDetail {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Redacted => "redacted",
            Self::Verbose => "verbose",
        }
    }
}

impl TryFrom<&str> for ErrorDetail {
    type Error = ParseErrorDetailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redacted" => Ok(Self::Redacted),
            "verbose" => Ok(Self::Verbose),
            _ => Err(ParseErrorDetailError(value.to_owned())),
        }
    }
}

/// Error returned while parsing an [`ErrorDetail`] setting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown error detail level: {0}")]
pub struct ParseErrorDetailError(pub String);

/// Error payload safe to hand back across the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
}

impl ClientError {
    /// Projects a classified error into a client-facing payload.
    ///
    /// Internal failures are logged with their full message and, unless
    /// `detail` is [`ErrorDetail::Verbose`], replaced by a generic message.
    #[must_use]
    pub fn from_error<E>(error: &E, detail: ErrorDetail) -> Self
    where
        E: ClassifyError + ?Sized,
    {
        let kind = error.kind();
        if kind.is_business() {
            return Self {
                kind,
                message: error.to_string(),
            };
        }

        tracing::error!(error = %error, "internal failure surfaced to caller");
        let message = match detail {
            ErrorDetail::Redacted => INTERNAL_MESSAGE.to_owned(),
            ErrorDetail::Verbose => error.to_string(),
        };
        Self { kind, message }
    }

    /// Returns the stable error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
