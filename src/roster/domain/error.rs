//! Error types for roster validation.

use crate::identity::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing roster values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterDomainError {
    /// The mentor side of a link does not carry the mentor prefix.
    #[error("{0} is not a mentor ID")]
    NotAMentor(UserId),

    /// The student side of a link does not carry the student prefix.
    #[error("{0} is not a student ID")]
    NotAStudent(UserId),

    /// The student name is empty after trimming.
    #[error("student name must not be empty")]
    EmptyStudentName,

    /// The student name exceeds the stored column width.
    #[error("student name is {0} characters, expected at most 255")]
    StudentNameTooLong(usize),
}
