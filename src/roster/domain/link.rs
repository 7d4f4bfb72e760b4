//! Mentor-student links.

use super::RosterDomainError;
use crate::identity::domain::{Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Authorization link between a mentor and a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentorStudentLink {
    mentor_id: UserId,
    student_id: UserId,
    is_active: bool,
    assigned_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedLinkData {
    /// Persisted mentor ID.
    pub mentor_id: UserId,
    /// Persisted student ID.
    pub student_id: UserId,
    /// Persisted activation flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub assigned_at: DateTime<Utc>,
    /// Persisted last activation change.
    pub updated_at: DateTime<Utc>,
}

impl MentorStudentLink {
    /// Creates an active link.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::NotAMentor`] or
    /// [`RosterDomainError::NotAStudent`] when either ID carries the wrong
    /// role prefix.
    pub fn new(
        mentor_id: UserId,
        student_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, RosterDomainError> {
        if mentor_id.implied_role().ok() != Some(Role::Mentor) {
            return Err(RosterDomainError::NotAMentor(mentor_id));
        }
        if student_id.implied_role().ok() != Some(Role::Student) {
            return Err(RosterDomainError::NotAStudent(student_id));
        }
        let timestamp = clock.utc();
        Ok(Self {
            mentor_id,
            student_id,
            is_active: true,
            assigned_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a link from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLinkData) -> Self {
        Self {
            mentor_id: data.mentor_id,
            student_id: data.student_id,
            is_active: data.is_active,
            assigned_at: data.assigned_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the mentor ID.
    #[must_use]
    pub const fn mentor_id(&self) -> &UserId {
        &self.mentor_id
    }

    /// Returns the student ID.
    #[must_use]
    pub const fn student_id(&self) -> &UserId {
        &self.student_id
    }

    /// Returns whether the link currently authorizes the mentor.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns when the link was first created.
    #[must_use]
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Returns the last activation change.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Deactivates the link. Returns `false` when it was already inactive.
    pub fn deactivate(&mut self, clock: &impl Clock) -> bool {
        self.set_active(false, clock)
    }

    /// Reactivates the link. Returns `false` when it was already active.
    pub fn reactivate(&mut self, clock: &impl Clock) -> bool {
        self.set_active(true, clock)
    }

    fn set_active(&mut self, active: bool, clock: &impl Clock) -> bool {
        if self.is_active == active {
            return false;
        }
        self.is_active = active;
        self.updated_at = clock.utc();
        true
    }
}
