//! Runtime configuration for the mentorship platform.
//!
//! Settings are read from `MENTORSHIP_*` environment variables with
//! production-safe defaults. Lookups go through an injectable function so the
//! parsing rules can be exercised without touching process state.

use crate::{
    assignment::domain::ReviewPolicy,
    error::ErrorDetail,
    identity::domain::Cohort,
};
use thiserror::Error;

/// Environment variable selecting the two-digit cohort prefix.
pub const COHORT_VAR: &str = "MENTORSHIP_COHORT";
/// Environment variable selecting the review policy.
pub const REVIEW_POLICY_VAR: &str = "MENTORSHIP_REVIEW_POLICY";
/// Environment variable selecting how much internal error detail is exposed.
pub const ERROR_DETAIL_VAR: &str = "MENTORSHIP_ERROR_DETAIL";
/// Environment variable toggling lifecycle notification fan-out.
pub const NOTIFICATIONS_VAR: &str = "MENTORSHIP_NOTIFICATIONS";

/// Platform-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentorshipConfig {
    cohort: Cohort,
    review_policy: ReviewPolicy,
    error_detail: ErrorDetail,
    notifications_enabled: bool,
}

impl MentorshipConfig {
    /// Creates a configuration with production defaults.
    ///
    /// Defaults: cohort `26`, reviews require a submission, internal errors
    /// are redacted, and lifecycle notifications are enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cohort: Cohort::DEFAULT,
            review_policy: ReviewPolicy::RequireSubmission,
            error_detail: ErrorDetail::Redacted,
            notifications_enabled: true,
        }
    }

    /// Creates a configuration suited to local development.
    ///
    /// Identical to [`Self::new`] except that internal error messages are
    /// surfaced verbatim.
    #[must_use]
    pub const fn development() -> Self {
        Self::new().with_error_detail(ErrorDetail::Verbose)
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through the supplied variable lookup.
    ///
    /// Unset or blank variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// value that cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::new();

        if let Some(raw) = read(COHORT_VAR) {
            let cohort = raw
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(|value| Cohort::new(value).ok())
                .ok_or_else(|| ConfigError::invalid(COHORT_VAR, &raw, "expected 0-99"))?;
            config.cohort = cohort;
        }

        if let Some(raw) = read(REVIEW_POLICY_VAR) {
            config.review_policy = ReviewPolicy::try_from(raw.as_str()).map_err(|_| {
                ConfigError::invalid(
                    REVIEW_POLICY_VAR,
                    &raw,
                    "expected require_submission or allow_override",
                )
            })?;
        }

        if let Some(raw) = read(ERROR_DETAIL_VAR) {
            config.error_detail = ErrorDetail::try_from(raw.as_str()).map_err(|_| {
                ConfigError::invalid(ERROR_DETAIL_VAR, &raw, "expected redacted or verbose")
            })?;
        }

        if let Some(raw) = read(NOTIFICATIONS_VAR) {
            config.notifications_enabled = parse_flag(&raw)
                .ok_or_else(|| ConfigError::invalid(NOTIFICATIONS_VAR, &raw, "expected on or off"))?;
        }

        Ok(config)
    }

    /// Returns a copy with the given cohort.
    #[must_use]
    pub const fn with_cohort(mut self, cohort: Cohort) -> Self {
        self.cohort = cohort;
        self
    }

    /// Returns a copy with the given review policy.
    #[must_use]
    pub const fn with_review_policy(mut self, review_policy: ReviewPolicy) -> Self {
        self.review_policy = review_policy;
        self
    }

    /// Returns a copy with the given error detail level.
    #[must_use]
    pub const fn with_error_detail(mut self, error_detail: ErrorDetail) -> Self {
        self.error_detail = error_detail;
        self
    }

    /// Returns a copy with lifecycle notifications enabled or disabled.
    #[must_use]
    pub const fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    /// Returns the cohort used when allocating user IDs.
    #[must_use]
    pub const fn cohort(&self) -> Cohort {
        self.cohort
    }

    /// Returns the review policy.
    #[must_use]
    pub const fn review_policy(&self) -> ReviewPolicy {
        self.review_policy
    }

    /// Returns the error detail level.
    #[must_use]
    pub const fn error_detail(&self) -> ErrorDetail {
        self.error_detail
    }

    /// Returns whether lifecycle notifications are emitted.
    #[must_use]
    pub const fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }
}

impl Default for MentorshipConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {variable}: {reason}")]
    InvalidValue {
        /// Environment variable name.
        variable: &'static str,
        /// Raw value found.
        value: String,
        /// Accepted values.
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(variable: &'static str, value: &str, reason: &'static str) -> Self {
        Self::InvalidValue {
            variable,
            value: value.to_owned(),
            reason,
        }
    }
}
