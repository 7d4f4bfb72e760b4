//! Task assignment aggregate.

use super::{
    AssignmentDomainError, AssignmentEvent, AssignmentId, AssignmentStatus, ReviewPolicy,
    ReviewVerdict, SubmissionLinks,
};
use crate::catalog::domain::TaskId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::cmp::Reverse;

/// One task assigned to one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskAssignment {
    id: AssignmentId,
    task_id: TaskId,
    student_id: UserId,
    github_link: Option<String>,
    hosted_link: Option<String>,
    status: AssignmentStatus,
    mentor_remark: Option<String>,
    assigned_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    reviewed_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssignmentData {
    /// Persisted identifier.
    pub id: AssignmentId,
    /// Persisted task.
    pub task_id: TaskId,
    /// Persisted student.
    pub student_id: UserId,
    /// Persisted repository link.
    pub github_link: Option<String>,
    /// Persisted hosted link.
    pub hosted_link: Option<String>,
    /// Persisted status.
    pub status: AssignmentStatus,
    /// Persisted mentor remark.
    pub mentor_remark: Option<String>,
    /// Persisted assignment timestamp.
    pub assigned_at: DateTime<Utc>,
    /// Persisted submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Persisted review timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskAssignment {
    /// Creates a pending assignment.
    #[must_use]
    pub fn assign(task_id: TaskId, student_id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AssignmentId::new(),
            task_id,
            student_id,
            github_link: None,
            hosted_link: None,
            status: AssignmentStatus::Pending,
            mentor_remark: None,
            assigned_at: timestamp,
            submitted_at: None,
            reviewed_at: None,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAssignmentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            student_id: data.student_id,
            github_link: data.github_link,
            hosted_link: data.hosted_link,
            status: data.status,
            mentor_remark: data.mentor_remark,
            assigned_at: data.assigned_at,
            submitted_at: data.submitted_at,
            reviewed_at: data.reviewed_at,
            updated_at: data.updated_at,
        }
    }

    /// Hands in work, replacing any earlier links.
    ///
    /// Returns the status the assignment was in before the submission.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::InvalidTransition`] when the
    /// assignment is already submitted or approved.
    pub fn submit(
        &mut self,
        links: SubmissionLinks,
        clock: &impl Clock,
    ) -> Result<AssignmentStatus, AssignmentDomainError> {
        let previous = self.status;
        let next = self.transition(AssignmentEvent::Submit, ReviewPolicy::RequireSubmission)?;
        let (github, hosted) = links.into_parts();
        let timestamp = clock.utc();
        self.github_link = github;
        self.hosted_link = hosted;
        self.status = next;
        self.submitted_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(previous)
    }

    /// Records a mentor verdict.
    ///
    /// Returns the status the assignment was in before the review.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::InvalidTransition`] when `policy`
    /// does not allow reviewing the current status.
    pub fn review(
        &mut self,
        verdict: ReviewVerdict,
        remark: Option<String>,
        policy: ReviewPolicy,
        clock: &impl Clock,
    ) -> Result<AssignmentStatus, AssignmentDomainError> {
        let previous = self.status;
        let next = self.transition(AssignmentEvent::Review(verdict), policy)?;
        let timestamp = clock.utc();
        self.status = next;
        self.mentor_remark = remark
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        self.reviewed_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(previous)
    }

    fn transition(
        &self,
        event: AssignmentEvent,
        policy: ReviewPolicy,
    ) -> Result<AssignmentStatus, AssignmentDomainError> {
        self.status
            .apply(event, policy)
            .ok_or(AssignmentDomainError::InvalidTransition {
                from: self.status,
                event,
            })
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the assigned task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assigned student.
    #[must_use]
    pub const fn student_id(&self) -> &UserId {
        &self.student_id
    }

    /// Returns the repository link of the latest submission.
    #[must_use]
    pub fn github_link(&self) -> Option<&str> {
        self.github_link.as_deref()
    }

    /// Returns the hosted link of the latest submission.
    #[must_use]
    pub fn hosted_link(&self) -> Option<&str> {
        self.hosted_link.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> AssignmentStatus {
        self.status
    }

    /// Returns the remark from the latest review.
    #[must_use]
    pub fn mentor_remark(&self) -> Option<&str> {
        self.mentor_remark.as_deref()
    }

    /// Returns when the task was assigned.
    #[must_use]
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Returns when work was last submitted.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns when work was last reviewed.
    #[must_use]
    pub const fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.reviewed_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Orders assignments by latest submission, unsubmitted work last, then by
/// assignment time, newest first.
pub fn sort_newest_submission_first(assignments: &mut [TaskAssignment]) {
    assignments.sort_by_key(|assignment| {
        Reverse((assignment.submitted_at(), assignment.assigned_at()))
    });
}
