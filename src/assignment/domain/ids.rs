//! Identifier for task assignments.

use crate::ids::uuid_identifier;

uuid_identifier!(
    /// Unique identifier for a task assignment.
    AssignmentId
);
