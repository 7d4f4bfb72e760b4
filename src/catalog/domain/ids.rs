//! Identifiers for catalog entities.

use crate::ids::uuid_identifier;

uuid_identifier!(
    /// Unique identifier for a course.
    CourseId
);

uuid_identifier!(
    /// Unique identifier for a task template.
    TaskId
);
