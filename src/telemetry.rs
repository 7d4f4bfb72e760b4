//! Structured logging bootstrap.
//!
//! Services emit `tracing` events for every lifecycle change and for
//! best-effort side effects that fail. Hosts call [`init`] once at start-up to
//! route those events to stderr; library code never installs a subscriber on
//! its own.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "mentorship=info";

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter directive could not be parsed.
    #[error("invalid log filter directive: {0}")]
    InvalidDirective(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber has already been installed for this process.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Builds the filter used by [`init`].
///
/// `RUST_LOG` wins when it is set and valid; otherwise `fallback` is parsed.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] when `fallback` is not a
/// valid filter directive.
pub fn filter_from_env(fallback: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| parse_filter(fallback))
}

/// Parses a filter directive such as `mentorship=debug`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] when the directive is
/// malformed.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    Ok(EnvFilter::try_new(directive)?)
}

/// Installs a compact stderr subscriber as the global default.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] when the fallback directive
/// is malformed, or [`TelemetryError::AlreadyInstalled`] when another
/// subscriber already owns the process.
pub fn init(fallback: &str) -> Result<(), TelemetryError> {
    let filter = filter_from_env(fallback)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInstalled)
}
