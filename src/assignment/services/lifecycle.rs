//! Assigning, submitting and reviewing tasks.

use crate::assignment::{
    domain::{
        AssignmentDomainError, AssignmentId, ParseReviewVerdictError, ReviewPolicy, ReviewVerdict,
        SubmissionLinks, TaskAssignment,
    },
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use crate::catalog::{
    domain::{CatalogEntry, TaskId},
    ports::CatalogRepository,
    services::{CatalogError, owned_task},
};
use crate::error::{ClassifyError, ErrorKind};
use crate::identity::domain::{Identity, IdentityDomainError, UserId};
use crate::notification::{
    domain::{LifecycleNotice, NotificationType},
    ports::NotificationRepository,
    services::Notifier,
};
use crate::roster::{
    ports::RosterRepository,
    services::{RosterError, require_active_link},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for a student submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitRequest {
    github_link: Option<String>,
    hosted_link: Option<String>,
}

impl SubmitRequest {
    /// Creates an empty submission.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            github_link: None,
            hosted_link: None,
        }
    }

    /// Sets the repository link.
    #[must_use]
    pub fn with_github_link(mut self, link: impl Into<String>) -> Self {
        self.github_link = Some(link.into());
        self
    }

    /// Sets the hosted deployment link.
    #[must_use]
    pub fn with_hosted_link(mut self, link: impl Into<String>) -> Self {
        self.hosted_link = Some(link.into());
        self
    }
}

/// Request payload for a mentor review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    status: String,
    remark: Option<String>,
}

impl ReviewRequest {
    /// Creates a review with the raw verdict, `approved` or `rejected`.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            remark: None,
        }
    }

    /// Sets the mentor remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }
}

/// Service-level errors for assignment operations.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// The caller's role does not permit the action.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// Validation or transition rules rejected the request.
    #[error(transparent)]
    Domain(#[from] AssignmentDomainError),

    /// The review verdict is not recognised.
    #[error(transparent)]
    InvalidVerdict(#[from] ParseReviewVerdictError),

    /// Task lookup or course ownership failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The mentor has no active link to the student.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// No assignment exists for the task and student.
    #[error("task {task_id} is not assigned to {student_id}")]
    NotAssigned {
        /// Requested task.
        task_id: TaskId,
        /// Requested student.
        student_id: UserId,
    },

    /// No assignment exists with the identifier.
    #[error("assignment not found: {0}")]
    AssignmentNotFound(AssignmentId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AssignmentRepositoryError),
}

impl ClassifyError for AssignmentError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(err) => err.kind(),
            Self::Domain(AssignmentDomainError::InvalidTransition { .. }) => ErrorKind::Conflict,
            Self::Domain(_) | Self::InvalidVerdict(_) => ErrorKind::InvalidInput,
            Self::Catalog(err) => err.kind(),
            Self::Roster(err) => err.kind(),
            Self::NotAssigned { .. } | Self::AssignmentNotFound(_) => ErrorKind::NotFound,
            Self::Repository(err) => err.kind(),
        }
    }
}

impl ClassifyError for AssignmentRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateAssignment { .. } | Self::StaleAssignment { .. } => {
                ErrorKind::Conflict
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for assignment service operations.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Assignment lifecycle orchestration service.
pub struct AssignmentLifecycleService<S, C>
where
    S: AssignmentRepository + CatalogRepository + RosterRepository + NotificationRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    notifier: Notifier<S, C>,
    policy: ReviewPolicy,
}

impl<S, C> Clone for AssignmentLifecycleService<S, C>
where
    S: AssignmentRepository + CatalogRepository + RosterRepository + NotificationRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            notifier: self.notifier.clone(),
            policy: self.policy,
        }
    }
}

impl<S, C> AssignmentLifecycleService<S, C>
where
    S: AssignmentRepository + CatalogRepository + RosterRepository + NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service that requires a submission before review and
    /// records lifecycle notifications.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        let notifier = Notifier::new(Arc::clone(&store), Arc::clone(&clock), true);
        Self {
            store,
            clock,
            notifier,
            policy: ReviewPolicy::default(),
        }
    }

    /// Sets the review policy.
    #[must_use]
    pub const fn with_review_policy(mut self, policy: ReviewPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables lifecycle notifications.
    #[must_use]
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifier = Notifier::new(Arc::clone(&self.store), Arc::clone(&self.clock), enabled);
        self
    }

    /// Returns the active review policy.
    #[must_use]
    pub const fn review_policy(&self) -> ReviewPolicy {
        self.policy
    }

    /// Assigns a task from one of the mentor's courses to a linked student.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Catalog`] when the task is missing or owned
    /// by another mentor, [`AssignmentError::Roster`] without an active link,
    /// and [`AssignmentError::Repository`] when the pair is already assigned.
    pub async fn assign(
        &self,
        mentor: &Identity,
        task_id: TaskId,
        student_id: &UserId,
    ) -> AssignmentResult<TaskAssignment> {
        let mentor_id = mentor.require_mentor()?;
        let entry = owned_task(&*self.store, mentor_id, task_id).await?;
        require_active_link(&*self.store, mentor_id, student_id).await?;

        let assignment = TaskAssignment::assign(task_id, student_id.clone(), &*self.clock);
        self.store.insert(&assignment).await?;
        info!(
            assignment_id = %assignment.id(),
            task_id = %task_id,
            student_id = %student_id,
            mentor_id = %mentor_id,
            "task assigned"
        );

        self.notifier
            .notify(
                &LifecycleNotice::new(student_id.clone(), NotificationType::TaskAssigned)
                    .related_to(assignment.id())
                    .with("task_title", entry.task().title()),
            )
            .await;
        Ok(assignment)
    }

    /// Submits work for the caller's assignment of `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::NotAssigned`] when no assignment exists,
    /// [`AssignmentError::Domain`] for missing or malformed links and for an
    /// assignment that is already submitted or approved.
    pub async fn submit(
        &self,
        student: &Identity,
        task_id: TaskId,
        request: SubmitRequest,
    ) -> AssignmentResult<TaskAssignment> {
        let student_id = student.require_student()?;
        let links = SubmissionLinks::new(request.github_link, request.hosted_link)?;
        let mut assignment = self
            .store
            .find_by_pair(task_id, student_id)
            .await?
            .ok_or_else(|| AssignmentError::NotAssigned {
                task_id,
                student_id: student_id.clone(),
            })?;

        let previous = assignment.submit(links, &*self.clock)?;
        self.store.update(&assignment, previous).await?;
        info!(
            assignment_id = %assignment.id(),
            student_id = %student_id,
            from = %previous,
            "assignment submitted"
        );
        Ok(assignment)
    }

    /// Reviews the assignment of `task_id` to `student_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::InvalidVerdict`] for an unknown status,
    /// [`AssignmentError::Catalog`] when the task is missing or owned by
    /// another mentor, [`AssignmentError::NotAssigned`] when no assignment
    /// exists, and [`AssignmentError::Domain`] when the review policy rejects
    /// the transition.
    pub async fn review(
        &self,
        mentor: &Identity,
        task_id: TaskId,
        student_id: &UserId,
        request: ReviewRequest,
    ) -> AssignmentResult<TaskAssignment> {
        let mentor_id = mentor.require_mentor()?;
        let verdict = ReviewVerdict::try_from(request.status.as_str())?;
        let entry = owned_task(&*self.store, mentor_id, task_id).await?;
        let assignment = self
            .store
            .find_by_pair(task_id, student_id)
            .await?
            .ok_or_else(|| AssignmentError::NotAssigned {
                task_id,
                student_id: student_id.clone(),
            })?;
        self.apply_review(mentor_id, &entry, assignment, verdict, request.remark)
            .await
    }

    /// Reviews an assignment addressed by its identifier.
    ///
    /// # Errors
    ///
    /// As [`Self::review`], with [`AssignmentError::AssignmentNotFound`] for
    /// an unknown identifier.
    pub async fn review_by_id(
        &self,
        mentor: &Identity,
        assignment_id: AssignmentId,
        request: ReviewRequest,
    ) -> AssignmentResult<TaskAssignment> {
        let mentor_id = mentor.require_mentor()?;
        let verdict = ReviewVerdict::try_from(request.status.as_str())?;
        let assignment = self
            .store
            .find_by_id(assignment_id)
            .await?
            .ok_or(AssignmentError::AssignmentNotFound(assignment_id))?;
        let entry = owned_task(&*self.store, mentor_id, assignment.task_id()).await?;
        self.apply_review(mentor_id, &entry, assignment, verdict, request.remark)
            .await
    }

    async fn apply_review(
        &self,
        mentor_id: &UserId,
        entry: &CatalogEntry,
        mut assignment: TaskAssignment,
        verdict: ReviewVerdict,
        remark: Option<String>,
    ) -> AssignmentResult<TaskAssignment> {
        let previous = assignment.review(verdict, remark, self.policy, &*self.clock)?;
        self.store.update(&assignment, previous).await?;
        info!(
            assignment_id = %assignment.id(),
            mentor_id = %mentor_id,
            from = %previous,
            to = %assignment.status(),
            "assignment reviewed"
        );

        let mut notice =
            LifecycleNotice::new(assignment.student_id().clone(), NotificationType::TaskReviewed)
                .related_to(assignment.id())
                .with("task_title", entry.task().title())
                .with("verdict", verdict.as_str());
        if let Some(remark_text) = assignment.mentor_remark() {
            notice = notice.with("remark", remark_text);
        }
        self.notifier.notify(&notice).await;
        Ok(assignment)
    }

    /// Lists the calling student's assignments, newest submission first.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Identity`] for non-students.
    pub async fn list_for_student(
        &self,
        student: &Identity,
    ) -> AssignmentResult<Vec<TaskAssignment>> {
        let student_id = student.require_student()?;
        Ok(self.store.list_for_student(student_id).await?)
    }

    /// Lists assignments on tasks in the calling mentor's courses, newest
    /// submission first.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Identity`] for non-mentors.
    pub async fn list_for_mentor(
        &self,
        mentor: &Identity,
    ) -> AssignmentResult<Vec<TaskAssignment>> {
        let mentor_id = mentor.require_mentor()?;
        Ok(self.store.list_for_mentor(mentor_id).await?)
    }
}
