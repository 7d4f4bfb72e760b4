//! Warning aggregate.

use super::{WarningDomainError, WarningEvent, WarningId, WarningLevel, WarningStatus};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Behavioural warning issued by a mentor to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    id: WarningId,
    student_id: UserId,
    mentor_id: UserId,
    title: String,
    remark: String,
    level: WarningLevel,
    status: WarningStatus,
    resolution_comment: Option<String>,
    resolved_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWarningData {
    /// Persisted identifier.
    pub id: WarningId,
    /// Persisted student.
    pub student_id: UserId,
    /// Persisted issuing mentor.
    pub mentor_id: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted remark.
    pub remark: String,
    /// Persisted level.
    pub level: WarningLevel,
    /// Persisted status.
    pub status: WarningStatus,
    /// Persisted resolution comment.
    pub resolution_comment: Option<String>,
    /// Persisted resolution timestamp.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Persisted issue timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Warning {
    /// Creates an active warning.
    ///
    /// # Errors
    ///
    /// Returns [`WarningDomainError::EmptyTitle`] or
    /// [`WarningDomainError::EmptyRemark`] for blank fields.
    pub fn issue(
        student_id: UserId,
        mentor_id: UserId,
        title: impl Into<String>,
        remark: impl Into<String>,
        level: WarningLevel,
        clock: &impl Clock,
    ) -> Result<Self, WarningDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: WarningId::new(),
            student_id,
            mentor_id,
            title: required(title.into(), WarningDomainError::EmptyTitle)?,
            remark: required(remark.into(), WarningDomainError::EmptyRemark)?,
            level,
            status: WarningStatus::Active,
            resolution_comment: None,
            resolved_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a warning from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWarningData) -> Self {
        Self {
            id: data.id,
            student_id: data.student_id,
            mentor_id: data.mentor_id,
            title: data.title,
            remark: data.remark,
            level: data.level,
            status: data.status,
            resolution_comment: data.resolution_comment,
            resolved_at: data.resolved_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Resolves the warning, keeping the mentor's remark intact.
    ///
    /// Returns the status the warning was in before resolution.
    ///
    /// # Errors
    ///
    /// Returns [`WarningDomainError::EmptyResolutionComment`] for a blank
    /// comment and [`WarningDomainError::InvalidTransition`] when the warning
    /// is already resolved.
    pub fn resolve(
        &mut self,
        comment: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<WarningStatus, WarningDomainError> {
        let previous = self.status;
        let event = WarningEvent::Resolve;
        let next = previous
            .apply(event)
            .ok_or(WarningDomainError::InvalidTransition {
                from: previous,
                event,
            })?;
        let text = required(comment.into(), WarningDomainError::EmptyResolutionComment)?;
        let timestamp = clock.utc();
        self.status = next;
        self.resolution_comment = Some(text);
        self.resolved_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(previous)
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> WarningId {
        self.id
    }

    /// Returns the warned student.
    #[must_use]
    pub const fn student_id(&self) -> &UserId {
        &self.student_id
    }

    /// Returns the issuing mentor.
    #[must_use]
    pub const fn mentor_id(&self) -> &UserId {
        &self.mentor_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the mentor's remark.
    #[must_use]
    pub fn remark(&self) -> &str {
        &self.remark
    }

    /// Returns the severity level.
    #[must_use]
    pub const fn level(&self) -> WarningLevel {
        self.level
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> WarningStatus {
        self.status
    }

    /// Returns whether the warning is still outstanding.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, WarningStatus::Active)
    }

    /// Returns the student's resolution comment.
    #[must_use]
    pub fn resolution_comment(&self) -> Option<&str> {
        self.resolution_comment.as_deref()
    }

    /// Returns when the warning was resolved.
    #[must_use]
    pub const fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    /// Returns when the warning was issued.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn required(value: String, error: WarningDomainError) -> Result<String, WarningDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}
