//! In-memory assignment repository.

use crate::assignment::{
    domain::{AssignmentId, AssignmentStatus, TaskAssignment, sort_newest_submission_first},
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};
use crate::catalog::domain::TaskId;
use crate::identity::domain::UserId;
use crate::store::{InMemoryStore, StoreLockError};
use async_trait::async_trait;

impl From<StoreLockError> for AssignmentRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn insert(&self, assignment: &TaskAssignment) -> AssignmentRepositoryResult<()> {
        let mut state = self.write()?;
        let pair = (assignment.task_id(), assignment.student_id().clone());
        if state.assignment_pairs.contains_key(&pair) {
            return Err(AssignmentRepositoryError::DuplicateAssignment {
                task_id: assignment.task_id(),
                student_id: assignment.student_id().clone(),
            });
        }
        state.assignment_pairs.insert(pair, assignment.id());
        state
            .assignments
            .insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn update(
        &self,
        assignment: &TaskAssignment,
        expected: AssignmentStatus,
    ) -> AssignmentRepositoryResult<()> {
        let mut state = self.write()?;
        let Some(stored) = state.assignments.get_mut(&assignment.id()) else {
            return Err(AssignmentRepositoryError::NotFound(assignment.id()));
        };
        if stored.status() != expected {
            return Err(AssignmentRepositoryError::StaleAssignment {
                id: assignment.id(),
                expected,
            });
        }
        *stored = assignment.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AssignmentId,
    ) -> AssignmentRepositoryResult<Option<TaskAssignment>> {
        let state = self.read()?;
        Ok(state.assignments.get(&id).cloned())
    }

    async fn find_by_pair(
        &self,
        task_id: TaskId,
        student_id: &UserId,
    ) -> AssignmentRepositoryResult<Option<TaskAssignment>> {
        let state = self.read()?;
        Ok(state
            .assignment_pairs
            .get(&(task_id, student_id.clone()))
            .and_then(|id| state.assignments.get(id))
            .cloned())
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskAssignment>> {
        let state = self.read()?;
        let mut assignments: Vec<TaskAssignment> = state
            .assignments
            .values()
            .filter(|assignment| assignment.student_id() == student_id)
            .cloned()
            .collect();
        sort_newest_submission_first(&mut assignments);
        Ok(assignments)
    }

    async fn list_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskAssignment>> {
        let state = self.read()?;
        let mut assignments: Vec<TaskAssignment> = state
            .assignments
            .values()
            .filter(|assignment| {
                state
                    .tasks
                    .get(&assignment.task_id())
                    .and_then(|task| state.courses.get(&task.course_id()))
                    .is_some_and(|course| course.is_owned_by(mentor_id))
            })
            .cloned()
            .collect();
        sort_newest_submission_first(&mut assignments);
        Ok(assignments)
    }
}
