//! In-memory catalog repository.

use crate::catalog::{
    domain::{CatalogEntry, Course, CourseId, Task, TaskId},
    ports::{CatalogRepository, CatalogRepositoryError, CatalogRepositoryResult},
};
use crate::identity::domain::UserId;
use crate::store::{InMemoryStore, StoreLockError, memory::StoreState};
use async_trait::async_trait;
use std::cmp::Reverse;

impl From<StoreLockError> for CatalogRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

fn entry_for(state: &StoreState, task: &Task) -> Option<CatalogEntry> {
    state
        .courses
        .get(&task.course_id())
        .map(|course| CatalogEntry::new(task.clone(), course.clone()))
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn store_course(&self, course: &Course) -> CatalogRepositoryResult<()> {
        let mut state = self.write()?;
        if state.courses.contains_key(&course.id()) {
            return Err(CatalogRepositoryError::DuplicateCourse(course.id()));
        }
        state.courses.insert(course.id(), course.clone());
        Ok(())
    }

    async fn find_course(&self, id: CourseId) -> CatalogRepositoryResult<Option<Course>> {
        let state = self.read()?;
        Ok(state.courses.get(&id).cloned())
    }

    async fn courses_for_mentor(&self, mentor_id: &UserId) -> CatalogRepositoryResult<Vec<Course>> {
        let state = self.read()?;
        let mut courses: Vec<Course> = state
            .courses
            .values()
            .filter(|course| course.is_owned_by(mentor_id))
            .cloned()
            .collect();
        courses.sort_by_key(|course| Reverse(course.created_at()));
        Ok(courses)
    }

    async fn store_task(&self, task: &Task) -> CatalogRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.courses.contains_key(&task.course_id()) {
            return Err(CatalogRepositoryError::CourseNotFound(task.course_id()));
        }
        if state.tasks.contains_key(&task.id()) {
            return Err(CatalogRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> CatalogRepositoryResult<()> {
        let mut state = self.write()?;
        let Some(stored) = state.tasks.get_mut(&task.id()) else {
            return Err(CatalogRepositoryError::TaskNotFound(task.id()));
        };
        *stored = task.clone();
        Ok(())
    }

    async fn find_entry(&self, id: TaskId) -> CatalogRepositoryResult<Option<CatalogEntry>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .get(&id)
            .and_then(|task| entry_for(&state, task)))
    }

    async fn find_entries(&self, ids: &[TaskId]) -> CatalogRepositoryResult<Vec<CatalogEntry>> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter_map(|task| entry_for(&state, task))
            .collect())
    }

    async fn entries_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> CatalogRepositoryResult<Vec<CatalogEntry>> {
        let state = self.read()?;
        let mut entries: Vec<CatalogEntry> = state
            .tasks
            .values()
            .filter_map(|task| entry_for(&state, task))
            .filter(|entry| entry.owner() == mentor_id)
            .collect();
        entries.sort_by_key(|entry| Reverse(entry.task().created_at()));
        Ok(entries)
    }
}
