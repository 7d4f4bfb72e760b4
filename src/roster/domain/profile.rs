//! Student profiles and onboarding bundles.

use super::{MentorStudentLink, RosterDomainError};
use crate::identity::domain::{User, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeMap;

const MAX_NAME_LENGTH: usize = 255;

/// Validated student display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StudentName(String);

impl StudentName {
    /// Creates a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyStudentName`] for blank names and
    /// [`RosterDomainError::StudentNameTooLong`] past 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, RosterDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RosterDomainError::EmptyStudentName);
        }
        let length = trimmed.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(RosterDomainError::StudentNameTooLong(length));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Student profile with the warning counter cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentProfile {
    student_id: UserId,
    name: StudentName,
    photo: Option<String>,
    social_links: BTreeMap<String, String>,
    warning_count: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted student ID.
    pub student_id: UserId,
    /// Persisted display name.
    pub name: StudentName,
    /// Persisted photo URL.
    pub photo: Option<String>,
    /// Persisted social links.
    pub social_links: BTreeMap<String, String>,
    /// Persisted warning counter.
    pub warning_count: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl StudentProfile {
    /// Creates an empty profile with no warnings.
    #[must_use]
    pub fn new(student_id: UserId, name: StudentName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            student_id,
            name,
            photo: None,
            social_links: BTreeMap::new(),
            warning_count: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            student_id: data.student_id,
            name: data.name,
            photo: data.photo,
            social_links: data.social_links,
            warning_count: data.warning_count,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the photo URL.
    #[must_use]
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Sets the social links.
    #[must_use]
    pub fn with_social_links(mut self, social_links: BTreeMap<String, String>) -> Self {
        self.social_links = social_links;
        self
    }

    /// Returns the student ID.
    #[must_use]
    pub const fn student_id(&self) -> &UserId {
        &self.student_id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &StudentName {
        &self.name
    }

    /// Returns the photo URL, if any.
    #[must_use]
    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    /// Returns the social links keyed by network.
    #[must_use]
    pub const fn social_links(&self) -> &BTreeMap<String, String> {
        &self.social_links
    }

    /// Returns how many warnings have ever been issued to the student.
    #[must_use]
    pub const fn warning_count(&self) -> u32 {
        self.warning_count
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Increments the warning counter for a warning issued at `issued_at`
    /// and returns the new value.
    pub fn record_warning(&mut self, issued_at: DateTime<Utc>) -> u32 {
        self.warning_count = self.warning_count.saturating_add(1);
        self.updated_at = issued_at;
        self.warning_count
    }

    /// Applies mentor edits to the profile.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError`] when a new name is invalid.
    pub fn apply(
        &mut self,
        changes: ProfileChanges,
        clock: &impl Clock,
    ) -> Result<(), RosterDomainError> {
        let ProfileChanges {
            name,
            photo,
            social_links,
        } = changes;
        if let Some(raw) = name {
            self.name = StudentName::new(raw)?;
        }
        if let Some(url) = photo {
            self.photo = Some(url).filter(|value| !value.trim().is_empty());
        }
        if let Some(links) = social_links {
            self.social_links = links;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// Partial update to a student profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    name: Option<String>,
    photo: Option<String>,
    social_links: Option<BTreeMap<String, String>>,
}

impl ProfileChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the photo URL. A blank URL clears the photo.
    #[must_use]
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Replaces the social links.
    #[must_use]
    pub fn with_social_links(mut self, social_links: BTreeMap<String, String>) -> Self {
        self.social_links = Some(social_links);
        self
    }
}

/// Everything created when a mentor onboards a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Login identity for the new student.
    pub user: User,
    /// Initial profile.
    pub profile: StudentProfile,
    /// Active link to the onboarding mentor.
    pub link: MentorStudentLink,
}
