//! Domain model for roster links and student profiles.

mod error;
mod link;
mod profile;

pub use error::RosterDomainError;
pub use link::{MentorStudentLink, PersistedLinkData};
pub use profile::{Enrollment, PersistedProfileData, ProfileChanges, StudentName, StudentProfile};
