//! Course and task authoring.

use crate::catalog::{
    domain::{CatalogDomainError, CatalogEntry, Course, CourseId, Task, TaskChanges, TaskId},
    ports::{CatalogRepository, CatalogRepositoryError},
};
use crate::error::{ClassifyError, ErrorKind};
use crate::identity::domain::{Identity, IdentityDomainError, UserId};
use crate::notification::{
    domain::{LifecycleNotice, NotificationType},
    ports::NotificationRepository,
    services::Notifier,
};
use crate::roster::ports::RosterRepository;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCourseRequest {
    title: String,
    url: Option<String>,
}

impl CreateCourseRequest {
    /// Creates a request with the course title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
        }
    }

    /// Sets the course URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    course_id: CourseId,
    title: String,
    description: String,
    doc_link: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        course_id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            course_id,
            title: title.into(),
            description: description.into(),
            doc_link: None,
        }
    }

    /// Sets the documentation link.
    #[must_use]
    pub fn with_doc_link(mut self, doc_link: impl Into<String>) -> Self {
        self.doc_link = Some(doc_link.into());
        self
    }
}

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The caller's identity does not permit the action.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CatalogDomainError),

    /// The course does not exist.
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The mentor does not own the course.
    #[error("{mentor_id} does not own course {course_id}")]
    NotCourseOwner {
        /// Acting mentor.
        mentor_id: UserId,
        /// Course in question.
        course_id: CourseId,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CatalogRepositoryError),
}

impl ClassifyError for CatalogError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(err) => err.kind(),
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::CourseNotFound(_) | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::NotCourseOwner { .. } => ErrorKind::Forbidden,
            Self::Repository(err) => err.kind(),
        }
    }
}

impl ClassifyError for CatalogRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateCourse(_) | Self::DuplicateTask(_) => ErrorKind::Conflict,
            Self::CourseNotFound(_) | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for catalog service operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Returns the task when `mentor_id` owns its course.
///
/// # Errors
///
/// Returns [`CatalogError::TaskNotFound`] when the task is absent and
/// [`CatalogError::NotCourseOwner`] when another mentor owns it.
pub async fn owned_task<R>(
    catalog: &R,
    mentor_id: &UserId,
    task_id: TaskId,
) -> CatalogResult<CatalogEntry>
where
    R: CatalogRepository + ?Sized,
{
    let entry = catalog
        .find_entry(task_id)
        .await?
        .ok_or(CatalogError::TaskNotFound(task_id))?;
    if entry.owner() != mentor_id {
        return Err(CatalogError::NotCourseOwner {
            mentor_id: mentor_id.clone(),
            course_id: entry.course().id(),
        });
    }
    Ok(entry)
}

/// Catalog orchestration service.
#[derive(Clone)]
pub struct TaskCatalogService<R, C>
where
    R: CatalogRepository + RosterRepository + NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    notifier: Notifier<R, C>,
}

impl<R, C> TaskCatalogService<R, C>
where
    R: CatalogRepository + RosterRepository + NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a catalog service that announces new courses.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        let notifier = Notifier::new(Arc::clone(&repository), Arc::clone(&clock), true);
        Self {
            repository,
            clock,
            notifier,
        }
    }

    /// Enables or disables course announcements.
    #[must_use]
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifier = Notifier::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.clock),
            enabled,
        );
        self
    }

    /// Creates a course owned by the calling mentor and notifies the
    /// mentor's active students.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Identity`] for non-mentors and
    /// [`CatalogError::Domain`] for a blank title.
    pub async fn create_course(
        &self,
        mentor: &Identity,
        request: CreateCourseRequest,
    ) -> CatalogResult<Course> {
        let mentor_id = mentor.require_mentor()?;
        let mut course = Course::new(mentor_id.clone(), request.title, &*self.clock)?;
        if let Some(url) = request.url {
            course = course.with_url(url);
        }
        self.repository.store_course(&course).await?;
        info!(mentor_id = %mentor_id, course_id = %course.id(), "created course");
        self.announce_course(&course).await;
        Ok(course)
    }

    async fn announce_course(&self, course: &Course) {
        if !self.notifier.is_enabled() {
            return;
        }
        let students = match self.repository.active_students(course.mentor_id()).await {
            Ok(students) => students,
            Err(error) => {
                warn!(
                    course_id = %course.id(),
                    error = %error,
                    "failed to load students for course announcement"
                );
                return;
            }
        };
        for profile in &students {
            let notice =
                LifecycleNotice::new(profile.student_id().clone(), NotificationType::CourseCreated)
                    .related_to(course.id())
                    .with("course_title", course.title());
            self.notifier.notify(&notice).await;
        }
    }

    /// Creates a task inside one of the mentor's courses.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CourseNotFound`] for unknown courses,
    /// [`CatalogError::NotCourseOwner`] for another mentor's course, and
    /// [`CatalogError::Domain`] for blank fields.
    pub async fn create_task(
        &self,
        mentor: &Identity,
        request: CreateTaskRequest,
    ) -> CatalogResult<CatalogEntry> {
        let mentor_id = mentor.require_mentor()?;
        let course = self
            .repository
            .find_course(request.course_id)
            .await?
            .ok_or(CatalogError::CourseNotFound(request.course_id))?;
        if !course.is_owned_by(mentor_id) {
            return Err(CatalogError::NotCourseOwner {
                mentor_id: mentor_id.clone(),
                course_id: course.id(),
            });
        }

        let mut task = Task::new(
            course.id(),
            request.title,
            request.description,
            &*self.clock,
        )?;
        if let Some(doc_link) = request.doc_link {
            task = task.with_doc_link(doc_link);
        }
        self.repository.store_task(&task).await?;
        info!(mentor_id = %mentor_id, task_id = %task.id(), "created task");
        Ok(CatalogEntry::new(task, course))
    }

    /// Edits a task the mentor owns.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::TaskNotFound`], [`CatalogError::NotCourseOwner`]
    /// or [`CatalogError::Domain`].
    pub async fn edit_task(
        &self,
        mentor: &Identity,
        task_id: TaskId,
        changes: TaskChanges,
    ) -> CatalogResult<CatalogEntry> {
        let mentor_id = mentor.require_mentor()?;
        let (mut task, course) = owned_task(&*self.repository, mentor_id, task_id)
            .await?
            .into_parts();
        task.apply(changes, &*self.clock)?;
        self.repository.update_task(&task).await?;
        Ok(CatalogEntry::new(task, course))
    }

    /// Returns a task with its course.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::TaskNotFound`] when the task is absent.
    pub async fn get_task(&self, task_id: TaskId) -> CatalogResult<CatalogEntry> {
        self.repository
            .find_entry(task_id)
            .await?
            .ok_or(CatalogError::TaskNotFound(task_id))
    }

    /// Lists every task in the mentor's courses, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Identity`] for non-mentors.
    pub async fn list_tasks(&self, mentor: &Identity) -> CatalogResult<Vec<CatalogEntry>> {
        let mentor_id = mentor.require_mentor()?;
        Ok(self.repository.entries_for_mentor(mentor_id).await?)
    }

    /// Lists the mentor's courses, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Identity`] for non-mentors.
    pub async fn list_courses(&self, mentor: &Identity) -> CatalogResult<Vec<Course>> {
        let mentor_id = mentor.require_mentor()?;
        Ok(self.repository.courses_for_mentor(mentor_id).await?)
    }
}
