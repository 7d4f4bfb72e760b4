//! Lock-guarded in-memory store.
//!
//! Every port implementation takes the single write lock for the whole of a
//! mutation, so check-then-insert sequences are atomic.

use crate::{
    assignment::domain::{AssignmentId, TaskAssignment},
    catalog::domain::{Course, CourseId, Task, TaskId},
    identity::domain::{User, UserId},
    notification::domain::{Notification, NotificationId},
    roster::domain::{MentorStudentLink, StudentProfile},
    warning::domain::{Warning, WarningId},
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Thread-safe in-memory store implementing every repository port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

/// Mentor-then-student key for roster links.
pub(crate) type LinkKey = (UserId, UserId);

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) profiles: HashMap<UserId, StudentProfile>,
    pub(crate) links: HashMap<LinkKey, MentorStudentLink>,
    pub(crate) courses: HashMap<CourseId, Course>,
    pub(crate) tasks: HashMap<TaskId, Task>,
    pub(crate) assignments: HashMap<AssignmentId, TaskAssignment>,
    pub(crate) assignment_pairs: HashMap<(TaskId, UserId), AssignmentId>,
    pub(crate) warnings: HashMap<WarningId, Warning>,
    pub(crate) notifications: HashMap<NotificationId, Notification>,
}

impl StoreState {
    /// Removes a student and everything that references them.
    pub(crate) fn purge_student(&mut self, student_id: &UserId) {
        self.users.remove(student_id);
        self.profiles.remove(student_id);
        self.links.retain(|(_, student), _| student != student_id);
        self.assignments
            .retain(|_, assignment| assignment.student_id() != student_id);
        self.assignment_pairs
            .retain(|(_, student), _| student != student_id);
        self.warnings
            .retain(|_, warning| warning.student_id() != student_id);
        self.notifications
            .retain(|_, notification| notification.user_id() != student_id);
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StoreLockError> {
        self.state
            .read()
            .map_err(|err| StoreLockError(err.to_string()))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StoreLockError> {
        self.state
            .write()
            .map_err(|err| StoreLockError(err.to_string()))
    }
}

/// The store lock was poisoned by a panicking writer.
#[derive(Debug, Clone, Error)]
#[error("in-memory store lock poisoned: {0}")]
pub struct StoreLockError(String);
