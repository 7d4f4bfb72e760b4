//! Identifier for warnings.

use crate::ids::uuid_identifier;

uuid_identifier!(
    /// Unique identifier for a warning.
    WarningId
);
