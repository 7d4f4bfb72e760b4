//! Assignment counters and completion arithmetic.

use crate::assignment::domain::{AssignmentStatus, TaskAssignment};
use serde::Serialize;

/// Percentage of `submitted` out of `total`, rounded to two decimals.
///
/// Returns `0.0` when `total` is zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "completion is reported as a rounded decimal percentage"
)]
pub fn completion_percentage(submitted: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = f64::from(submitted) / f64::from(total);
    (ratio * 10_000.0).round() / 100.0
}

/// Assignment counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentStats {
    total: u32,
    pending: u32,
    submitted: u32,
    approved: u32,
    rejected: u32,
}

impl AssignmentStats {
    /// Counts the given assignments.
    #[must_use]
    pub fn from_assignments<'a>(assignments: impl IntoIterator<Item = &'a TaskAssignment>) -> Self {
        let mut stats = Self::default();
        for assignment in assignments {
            stats.record(assignment.status());
        }
        stats
    }

    /// Adds one assignment in `status`.
    pub const fn record(&mut self, status: AssignmentStatus) {
        self.total = self.total.saturating_add(1);
        let slot = match status {
            AssignmentStatus::Pending => &mut self.pending,
            AssignmentStatus::Submitted => &mut self.submitted,
            AssignmentStatus::Approved => &mut self.approved,
            AssignmentStatus::Rejected => &mut self.rejected,
        };
        *slot = slot.saturating_add(1);
    }

    /// Returns the number of assignments.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Returns the number awaiting a submission.
    #[must_use]
    pub const fn pending(&self) -> u32 {
        self.pending
    }

    /// Returns the number awaiting review.
    #[must_use]
    pub const fn submitted(&self) -> u32 {
        self.submitted
    }

    /// Returns the number approved.
    #[must_use]
    pub const fn approved(&self) -> u32 {
        self.approved
    }

    /// Returns the number sent back for rework.
    #[must_use]
    pub const fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Returns submitted work as a percentage of all assignments.
    #[must_use]
    pub fn completion_percentage(&self) -> f64 {
        completion_percentage(self.submitted, self.total)
    }
}
