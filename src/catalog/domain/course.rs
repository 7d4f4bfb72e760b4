//! Courses owned by mentors.

use super::{CatalogDomainError, CourseId, error::optional_text, error::required_text};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Mentor-owned course grouping tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    id: CourseId,
    mentor_id: UserId,
    title: String,
    url: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCourseData {
    /// Persisted course identifier.
    pub id: CourseId,
    /// Persisted owning mentor.
    pub mentor_id: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted URL.
    pub url: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Creates a course owned by `mentor_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyCourseTitle`] for a blank title.
    pub fn new(
        mentor_id: UserId,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, CatalogDomainError> {
        Ok(Self {
            id: CourseId::new(),
            mentor_id,
            title: required_text(title.into(), CatalogDomainError::EmptyCourseTitle)?,
            url: None,
            created_at: clock.utc(),
        })
    }

    /// Sets the course URL. Blank URLs are ignored.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = optional_text(url.into());
        self
    }

    /// Reconstructs a course from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCourseData) -> Self {
        Self {
            id: data.id,
            mentor_id: data.mentor_id,
            title: data.title,
            url: data.url,
            created_at: data.created_at,
        }
    }

    /// Returns the course identifier.
    #[must_use]
    pub const fn id(&self) -> CourseId {
        self.id
    }

    /// Returns the owning mentor.
    #[must_use]
    pub const fn mentor_id(&self) -> &UserId {
        &self.mentor_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the course URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether `mentor_id` owns this course.
    #[must_use]
    pub fn is_owned_by(&self, mentor_id: &UserId) -> bool {
        &self.mentor_id == mentor_id
    }
}
