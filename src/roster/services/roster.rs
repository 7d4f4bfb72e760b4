//! Roster management and mentor authorization checks.

use crate::error::{ClassifyError, ErrorKind};
use crate::identity::{
    domain::{Cohort, Credential, Identity, IdentityDomainError, Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError},
    services::next_user_id,
};
use crate::roster::{
    domain::{
        Enrollment, MentorStudentLink, ProfileChanges, RosterDomainError, StudentName,
        StudentProfile,
    },
    ports::{RosterRepository, RosterRepositoryError},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for onboarding a new student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardStudentRequest {
    name: String,
    credential: String,
    photo: Option<String>,
    social_links: BTreeMap<String, String>,
}

impl OnboardStudentRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credential: credential.into(),
            photo: None,
            social_links: BTreeMap::new(),
        }
    }

    /// Sets the photo URL.
    #[must_use]
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Adds a social profile link.
    #[must_use]
    pub fn with_social_link(mut self, network: impl Into<String>, url: impl Into<String>) -> Self {
        self.social_links.insert(network.into(), url.into());
        self
    }
}

/// Service-level errors for roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The caller's identity does not permit the action.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RosterDomainError),

    /// The mentor has no qualifying link to the student.
    #[error("{mentor_id} is not authorized for student {student_id}")]
    NotAuthorized {
        /// Acting mentor.
        mentor_id: UserId,
        /// Target student.
        student_id: UserId,
    },

    /// The student does not exist.
    #[error("student not found: {0}")]
    StudentNotFound(UserId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RosterRepositoryError),

    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl ClassifyError for RosterError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(err) => err.kind(),
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::NotAuthorized { .. } => ErrorKind::Forbidden,
            Self::StudentNotFound(_) => ErrorKind::NotFound,
            Self::Repository(err) => err.kind(),
            Self::Directory(err) => err.kind(),
        }
    }
}

impl ClassifyError for RosterRepositoryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateStudent(_) | Self::DuplicateLink { .. } => ErrorKind::Conflict,
            Self::LinkNotFound { .. } | Self::StudentNotFound(_) => ErrorKind::NotFound,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for roster service operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Returns the active link between `mentor_id` and `student_id`.
///
/// # Errors
///
/// Returns [`RosterError::NotAuthorized`] when no link exists or the link is
/// inactive.
pub async fn require_active_link<R>(
    roster: &R,
    mentor_id: &UserId,
    student_id: &UserId,
) -> RosterResult<MentorStudentLink>
where
    R: RosterRepository + ?Sized,
{
    roster
        .find_link(mentor_id, student_id)
        .await?
        .filter(MentorStudentLink::is_active)
        .ok_or_else(|| RosterError::NotAuthorized {
            mentor_id: mentor_id.clone(),
            student_id: student_id.clone(),
        })
}

/// Roster orchestration service.
#[derive(Clone)]
pub struct RosterService<R, D, C>
where
    R: RosterRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    roster: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
    cohort: Cohort,
}

impl<R, D, C> RosterService<R, D, C>
where
    R: RosterRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new roster service allocating IDs in `cohort`.
    #[must_use]
    pub const fn new(roster: Arc<R>, directory: Arc<D>, clock: Arc<C>, cohort: Cohort) -> Self {
        Self {
            roster,
            directory,
            clock,
            cohort,
        }
    }

    /// Returns whether the mentor has an active link to the student.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Repository`] when the lookup fails.
    pub async fn is_authorized_mentor_for(
        &self,
        mentor_id: &UserId,
        student_id: &UserId,
    ) -> RosterResult<bool> {
        match require_active_link(&*self.roster, mentor_id, student_id).await {
            Ok(_) => Ok(true),
            Err(RosterError::NotAuthorized { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Creates a student account, profile and active link in one unit.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Identity`] for non-mentor callers,
    /// [`RosterError::Domain`] for invalid names, and
    /// [`RosterError::Repository`] when the allocated ID collides or storage
    /// fails.
    pub async fn onboard_student(
        &self,
        mentor: &Identity,
        request: OnboardStudentRequest,
    ) -> RosterResult<Enrollment> {
        let mentor_id = mentor.require_mentor()?;
        let OnboardStudentRequest {
            name,
            credential,
            photo,
            social_links,
        } = request;
        let student_name = StudentName::new(name)?;
        let secret = Credential::new(credential)?;

        let student_id = next_user_id(&*self.directory, Role::Student, self.cohort).await?;
        let user = User::new(student_id.clone(), Role::Student, secret, &*self.clock)?;
        let mut profile = StudentProfile::new(student_id.clone(), student_name, &*self.clock)
            .with_social_links(social_links);
        if let Some(url) = photo.filter(|value| !value.trim().is_empty()) {
            profile = profile.with_photo(url);
        }
        let link = MentorStudentLink::new(mentor_id.clone(), student_id, &*self.clock)?;

        let enrollment = Enrollment {
            user,
            profile,
            link,
        };
        self.roster.enroll(&enrollment).await?;
        info!(
            mentor_id = %mentor_id,
            student_id = %enrollment.user.user_id(),
            "onboarded student"
        );
        Ok(enrollment)
    }

    /// Links an existing student to the mentor, reactivating a former link.
    ///
    /// Linking an already active pair returns the existing link.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::StudentNotFound`] when the student has no
    /// profile.
    pub async fn link_student(
        &self,
        mentor: &Identity,
        student_id: &UserId,
    ) -> RosterResult<MentorStudentLink> {
        let mentor_id = mentor.require_mentor()?;
        if self.roster.find_profile(student_id).await?.is_none() {
            return Err(RosterError::StudentNotFound(student_id.clone()));
        }

        let Some(mut link) = self.roster.find_link(mentor_id, student_id).await? else {
            let created =
                MentorStudentLink::new(mentor_id.clone(), student_id.clone(), &*self.clock)?;
            self.roster.store_link(&created).await?;
            info!(mentor_id = %mentor_id, student_id = %student_id, "linked student");
            return Ok(created);
        };

        if link.reactivate(&*self.clock) {
            self.roster.update_link(&link).await?;
            info!(mentor_id = %mentor_id, student_id = %student_id, "relinked student");
        }
        Ok(link)
    }

    /// Deactivates the mentor's link to the student, keeping its history.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotAuthorized`] when the pair was never linked.
    pub async fn unlink_student(
        &self,
        mentor: &Identity,
        student_id: &UserId,
    ) -> RosterResult<MentorStudentLink> {
        let mentor_id = mentor.require_mentor()?;
        let mut link = self.any_link(mentor_id, student_id).await?;
        if link.deactivate(&*self.clock) {
            self.roster.update_link(&link).await?;
            info!(mentor_id = %mentor_id, student_id = %student_id, "unlinked student");
        }
        Ok(link)
    }

    /// Lists profiles of the mentor's active students.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Identity`] for non-mentor callers.
    pub async fn list_students(&self, mentor: &Identity) -> RosterResult<Vec<StudentProfile>> {
        let mentor_id = mentor.require_mentor()?;
        Ok(self.roster.active_students(mentor_id).await?)
    }

    /// Applies profile edits to an actively linked student.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotAuthorized`] without an active link and
    /// [`RosterError::StudentNotFound`] when the profile is absent.
    pub async fn update_student(
        &self,
        mentor: &Identity,
        student_id: &UserId,
        changes: ProfileChanges,
    ) -> RosterResult<StudentProfile> {
        let mentor_id = mentor.require_mentor()?;
        require_active_link(&*self.roster, mentor_id, student_id).await?;
        let mut profile = self
            .roster
            .find_profile(student_id)
            .await?
            .ok_or_else(|| RosterError::StudentNotFound(student_id.clone()))?;
        profile.apply(changes, &*self.clock)?;
        self.roster.update_profile(&profile).await?;
        Ok(profile)
    }

    /// Deletes an actively linked student with all their records.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotAuthorized`] without an active link.
    pub async fn remove_student(&self, mentor: &Identity, student_id: &UserId) -> RosterResult<()> {
        let mentor_id = mentor.require_mentor()?;
        require_active_link(&*self.roster, mentor_id, student_id).await?;
        self.roster.remove_student(student_id).await?;
        info!(mentor_id = %mentor_id, student_id = %student_id, "removed student");
        Ok(())
    }

    async fn any_link(
        &self,
        mentor_id: &UserId,
        student_id: &UserId,
    ) -> RosterResult<MentorStudentLink> {
        self.roster
            .find_link(mentor_id, student_id)
            .await?
            .ok_or_else(|| RosterError::NotAuthorized {
                mentor_id: mentor_id.clone(),
                student_id: student_id.clone(),
            })
    }
}
