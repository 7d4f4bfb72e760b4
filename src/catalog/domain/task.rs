//! Task templates and catalog entries.

use super::{
    CatalogDomainError, Course, CourseId, TaskId, error::optional_text, error::required_text,
};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Mentor-authored task template inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    course_id: CourseId,
    title: String,
    description: String,
    doc_link: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted course identifier.
    pub course_id: CourseId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted documentation link.
    pub doc_link: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task inside `course_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyTaskTitle`] or
    /// [`CatalogDomainError::EmptyTaskDescription`] for blank fields.
    pub fn new(
        course_id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, CatalogDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            course_id,
            title: required_text(title.into(), CatalogDomainError::EmptyTaskTitle)?,
            description: required_text(
                description.into(),
                CatalogDomainError::EmptyTaskDescription,
            )?,
            doc_link: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the documentation link. Blank links are ignored.
    #[must_use]
    pub fn with_doc_link(mut self, doc_link: impl Into<String>) -> Self {
        self.doc_link = optional_text(doc_link.into());
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            course_id: data.course_id,
            title: data.title,
            description: data.description,
            doc_link: data.doc_link,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning course identifier.
    #[must_use]
    pub const fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the documentation link, if any.
    #[must_use]
    pub fn doc_link(&self) -> Option<&str> {
        self.doc_link.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies mentor edits. The task keeps its identity and course.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError`] when a replacement field is blank.
    pub fn apply(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), CatalogDomainError> {
        let TaskChanges {
            title,
            description,
            doc_link,
        } = changes;
        let next_title = title
            .map(|raw| required_text(raw, CatalogDomainError::EmptyTaskTitle))
            .transpose()?;
        let next_description = description
            .map(|raw| required_text(raw, CatalogDomainError::EmptyTaskDescription))
            .transpose()?;

        if let Some(value) = next_title {
            self.title = value;
        }
        if let Some(value) = next_description {
            self.description = value;
        }
        if let Some(raw) = doc_link {
            self.doc_link = optional_text(raw);
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// Partial edit to a task template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<String>,
    doc_link: Option<String>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the documentation link. A blank link clears it.
    #[must_use]
    pub fn with_doc_link(mut self, doc_link: impl Into<String>) -> Self {
        self.doc_link = Some(doc_link.into());
        self
    }
}

/// A task together with the course that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    task: Task,
    course: Course,
}

impl CatalogEntry {
    /// Pairs a task with its course.
    #[must_use]
    pub const fn new(task: Task, course: Course) -> Self {
        Self { task, course }
    }

    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the owning course.
    #[must_use]
    pub const fn course(&self) -> &Course {
        &self.course
    }

    /// Returns the mentor who owns the task through its course.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        self.course.mentor_id()
    }

    /// Splits the entry into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Task, Course) {
        (self.task, self.course)
    }
}
