//! Per-student warning aggregates.

use super::{Warning, WarningLevel};
use serde::Serialize;
use std::collections::BTreeMap;

/// Standing derived from a student's outstanding warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "standing", content = "level", rename_all = "snake_case")]
pub enum WarningStanding {
    /// No active warnings.
    Clear,
    /// At least one active warning; carries the most severe active level.
    Warned(WarningLevel),
}

/// Counts of a student's warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningSummary {
    total_issued: u32,
    active: u32,
    resolved: u32,
    by_level: BTreeMap<WarningLevel, u32>,
    standing: WarningStanding,
}

impl WarningSummary {
    /// Summarizes `warnings` for a student whose counter reads
    /// `total_issued`.
    ///
    /// Every level appears in the breakdown, with zero when unused.
    #[must_use]
    pub fn new(total_issued: u32, warnings: &[Warning]) -> Self {
        let mut by_level: BTreeMap<WarningLevel, u32> =
            WarningLevel::ALL.iter().map(|level| (*level, 0)).collect();
        let mut active = 0_u32;
        let mut resolved = 0_u32;
        let mut highest_active: Option<WarningLevel> = None;

        for warning in warnings {
            if let Some(count) = by_level.get_mut(&warning.level()) {
                *count = count.saturating_add(1);
            }
            if warning.is_active() {
                active = active.saturating_add(1);
                highest_active = highest_active.max(Some(warning.level()));
            } else {
                resolved = resolved.saturating_add(1);
            }
        }

        Self {
            total_issued,
            active,
            resolved,
            by_level,
            standing: highest_active.map_or(WarningStanding::Clear, WarningStanding::Warned),
        }
    }

    /// Returns the lifetime warning counter.
    #[must_use]
    pub const fn total_issued(&self) -> u32 {
        self.total_issued
    }

    /// Returns the number of active warnings.
    #[must_use]
    pub const fn active(&self) -> u32 {
        self.active
    }

    /// Returns the number of resolved warnings.
    #[must_use]
    pub const fn resolved(&self) -> u32 {
        self.resolved
    }

    /// Returns the count of warnings at `level`.
    #[must_use]
    pub fn at_level(&self, level: WarningLevel) -> u32 {
        self.by_level.get(&level).copied().unwrap_or_default()
    }

    /// Returns the breakdown by level.
    #[must_use]
    pub const fn by_level(&self) -> &BTreeMap<WarningLevel, u32> {
        &self.by_level
    }

    /// Returns the derived standing.
    #[must_use]
    pub const fn standing(&self) -> WarningStanding {
        self.standing
    }
}
