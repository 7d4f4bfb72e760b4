//! Domain model for warnings.

mod error;
mod ids;
mod level;
mod summary;
mod warning;

pub use error::{ParseWarningLevelError, ParseWarningStatusError, WarningDomainError};
pub use ids::WarningId;
pub use level::{WarningEvent, WarningLevel, WarningStatus};
pub use summary::{WarningStanding, WarningSummary};
pub use warning::{PersistedWarningData, Warning};
