//! Error types for catalog validation.

use thiserror::Error;

/// Errors returned while constructing catalog values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogDomainError {
    /// The course title is empty after trimming.
    #[error("course title must not be empty")]
    EmptyCourseTitle,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyTaskDescription,
}

/// Trims `value`, returning `error` when nothing remains.
pub(super) fn required_text(
    value: String,
    error: CatalogDomainError,
) -> Result<String, CatalogDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

/// Trims `value`, mapping blank input to `None`.
pub(super) fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
