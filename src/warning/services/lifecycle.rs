//! Issuing, resolving and listing warnings.

use crate::error::{ClassifyError, ErrorKind};
use crate::identity::domain::{Identity, IdentityDomainError, UserId};
use crate::notification::{
    domain::{LifecycleNotice, NotificationType},
    ports::NotificationRepository,
    services::Notifier,
};
use crate::roster::{
    ports::{RosterRepository, RosterRepositoryError},
    services::{RosterError, require_active_link},
};
use crate::warning::{
    domain::{
        ParseWarningLevelError, ParseWarningStatusError, Warning, WarningDomainError, WarningId,
        WarningLevel, WarningStatus, WarningSummary,
    },
    ports::{WarningRepository, WarningRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for issuing a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueWarningRequest {
    student_id: String,
    title: String,
    remark: String,
    level: String,
    status: Option<String>,
}

impl IssueWarningRequest {
    /// Creates a request; `level` is one of `low`, `medium`, `high` or
    /// `critical`.
    #[must_use]
    pub fn new(
        student_id: impl Into<String>,
        title: impl Into<String>,
        remark: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            title: title.into(),
            remark: remark.into(),
            level: level.into(),
            status: None,
        }
    }

    /// Sets the initial status. Only `active` is accepted.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A newly issued warning with the student's updated counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedWarning {
    /// Stored warning.
    pub warning: Warning,
    /// Lifetime warning count after this issue.
    pub warning_count: u32,
}

/// A student's warnings with their aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentWarnings {
    /// Warnings, newest first.
    pub warnings: Vec<Warning>,
    /// Counts by status and level.
    pub summary: WarningSummary,
}

/// Service-level errors for warning operations.
#[derive(Debug, Error)]
pub enum WarningError {
    /// The caller's role does not permit the action, or a user ID is
    /// malformed.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// Validation or transition rules rejected the request.
    #[error(transparent)]
    Domain(#[from] WarningDomainError),

    /// The level is not recognised.
    #[error(transparent)]
    InvalidLevel(#[from] ParseWarningLevelError),

    /// The initial status is not recognised.
    #[error(transparent)]
    InvalidStatus(#[from] ParseWarningStatusError),

    /// The mentor has no active link to the student.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// The warning does not exist.
    #[error("warning not found: {0}")]
    NotFound(WarningId),

    /// The warning was issued to another student.
    #[error("warning {warning_id} does not belong to {student_id}")]
    NotOwner {
        /// Warning in question.
        warning_id: WarningId,
        /// Caller.
        student_id: UserId,
    },

    /// The student has no profile.
    #[error("student not found: {0}")]
    StudentNotFound(UserId),

    /// Profile lookup failed.
    #[error(transparent)]
    Profile(#[from] RosterRepositoryError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WarningRepositoryError),
}

impl ClassifyError for WarningError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(err) => err.kind(),
            Self::Domain(WarningDomainError::InvalidTransition { .. }) => ErrorKind::Conflict,
            Self::Domain(_) | Self::InvalidLevel(_) | Self::InvalidStatus(_) => {
                ErrorKind::InvalidInput
            }
            Self::Roster(err) => err.kind(),
            Self::NotFound(_) | Self::StudentNotFound(_) => ErrorKind::NotFound,
            Self::NotOwner { .. } => ErrorKind::Forbidden,
            Self::Profile(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

impl ClassifyError for WarningRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateWarning(_) | Self::StaleWarning { .. } => ErrorKind::Conflict,
            Self::StudentNotFound(_) | Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for warning service operations.
pub type WarningResult<T> = Result<T, WarningError>;

/// Warning lifecycle orchestration service.
#[derive(Clone)]
pub struct WarningLifecycleService<S, C>
where
    S: WarningRepository + RosterRepository + NotificationRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    notifier: Notifier<S, C>,
}

impl<S, C> WarningLifecycleService<S, C>
where
    S: WarningRepository + RosterRepository + NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service that records lifecycle notifications.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        let notifier = Notifier::new(Arc::clone(&store), Arc::clone(&clock), true);
        Self {
            store,
            clock,
            notifier,
        }
    }

    /// Enables or disables lifecycle notifications.
    #[must_use]
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifier = Notifier::new(Arc::clone(&self.store), Arc::clone(&self.clock), enabled);
        self
    }

    /// Issues a warning to a student linked to the mentor.
    ///
    /// # Errors
    ///
    /// Returns [`WarningError::InvalidLevel`], [`WarningError::InvalidStatus`]
    /// or [`WarningError::Domain`] for invalid fields,
    /// [`WarningError::Roster`] without an active link, and
    /// [`WarningError::Repository`] when the student has no profile.
    pub async fn issue(
        &self,
        mentor: &Identity,
        request: IssueWarningRequest,
    ) -> WarningResult<IssuedWarning> {
        let mentor_id = mentor.require_mentor()?;
        let IssueWarningRequest {
            student_id: raw_student_id,
            title,
            remark,
            level: raw_level,
            status,
        } = request;
        let student_id = UserId::new(raw_student_id)?;
        let level = WarningLevel::try_from(raw_level.as_str())?;
        if let Some(raw_status) = status {
            let initial = WarningStatus::try_from(raw_status.as_str())?;
            if initial != WarningStatus::Active {
                return Err(WarningDomainError::InvalidInitialStatus(initial).into());
            }
        }
        let warning = Warning::issue(
            student_id.clone(),
            mentor_id.clone(),
            title,
            remark,
            level,
            &*self.clock,
        )?;
        require_active_link(&*self.store, mentor_id, &student_id).await?;

        let warning_count = self.store.issue_warning(&warning).await?;
        info!(
            warning_id = %warning.id(),
            student_id = %student_id,
            mentor_id = %mentor_id,
            level = %level,
            warning_count,
            "warning issued"
        );

        self.notifier
            .notify(
                &LifecycleNotice::new(student_id, NotificationType::WarningIssued)
                    .related_to(warning.id())
                    .with("level", level.as_str())
                    .with("title", warning.title()),
            )
            .await;
        Ok(IssuedWarning {
            warning,
            warning_count,
        })
    }

    /// Resolves one of the calling student's active warnings.
    ///
    /// # Errors
    ///
    /// Returns [`WarningError::NotFound`] for an unknown warning,
    /// [`WarningError::NotOwner`] when it belongs to someone else, and
    /// [`WarningError::Domain`] when it is already resolved or the comment is
    /// blank.
    pub async fn resolve(
        &self,
        student: &Identity,
        warning_id: WarningId,
        comment: impl Into<String> + Send,
    ) -> WarningResult<Warning> {
        let student_id = student.require_student()?;
        let mut warning = self
            .store
            .find_warning(warning_id)
            .await?
            .ok_or(WarningError::NotFound(warning_id))?;
        if warning.student_id() != student_id {
            return Err(WarningError::NotOwner {
                warning_id,
                student_id: student_id.clone(),
            });
        }

        let previous = warning.resolve(comment, &*self.clock)?;
        self.store.update_warning(&warning, previous).await?;
        info!(
            warning_id = %warning_id,
            student_id = %student_id,
            "warning resolved"
        );
        Ok(warning)
    }

    /// Lists the calling student's warnings with status and level counts.
    ///
    /// # Errors
    ///
    /// Returns [`WarningError::StudentNotFound`] when the caller has no
    /// profile.
    pub async fn list_for_student(&self, student: &Identity) -> WarningResult<StudentWarnings> {
        let student_id = student.require_student()?;
        let profile = self
            .store
            .find_profile(student_id)
            .await?
            .ok_or_else(|| WarningError::StudentNotFound(student_id.clone()))?;
        let warnings = self.store.warnings_for_student(student_id).await?;
        let summary = WarningSummary::new(profile.warning_count(), &warnings);
        Ok(StudentWarnings { warnings, summary })
    }

    /// Lists warnings the calling mentor issued, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WarningError::Identity`] for non-mentors.
    pub async fn list_for_mentor(&self, mentor: &Identity) -> WarningResult<Vec<Warning>> {
        let mentor_id = mentor.require_mentor()?;
        Ok(self.store.warnings_for_mentor(mentor_id).await?)
    }
}
