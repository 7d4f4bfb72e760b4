//! In-memory warning repository.

use crate::identity::domain::UserId;
use crate::store::{InMemoryStore, StoreLockError};
use crate::warning::{
    domain::{Warning, WarningId, WarningStatus},
    ports::{WarningRepository, WarningRepositoryError, WarningRepositoryResult},
};
use async_trait::async_trait;
use std::cmp::Reverse;

impl From<StoreLockError> for WarningRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

fn newest_first(mut warnings: Vec<Warning>) -> Vec<Warning> {
    warnings.sort_by_key(|warning| Reverse(warning.created_at()));
    warnings
}

#[async_trait]
impl WarningRepository for InMemoryStore {
    async fn issue_warning(&self, warning: &Warning) -> WarningRepositoryResult<u32> {
        let mut state = self.write()?;
        if state.warnings.contains_key(&warning.id()) {
            return Err(WarningRepositoryError::DuplicateWarning(warning.id()));
        }
        let Some(profile) = state.profiles.get_mut(warning.student_id()) else {
            return Err(WarningRepositoryError::StudentNotFound(
                warning.student_id().clone(),
            ));
        };
        let count = profile.record_warning(warning.created_at());
        state.warnings.insert(warning.id(), warning.clone());
        Ok(count)
    }

    async fn update_warning(
        &self,
        warning: &Warning,
        expected: WarningStatus,
    ) -> WarningRepositoryResult<()> {
        let mut state = self.write()?;
        let Some(stored) = state.warnings.get_mut(&warning.id()) else {
            return Err(WarningRepositoryError::NotFound(warning.id()));
        };
        if stored.status() != expected {
            return Err(WarningRepositoryError::StaleWarning {
                id: warning.id(),
                expected,
            });
        }
        *stored = warning.clone();
        Ok(())
    }

    async fn find_warning(&self, id: WarningId) -> WarningRepositoryResult<Option<Warning>> {
        let state = self.read()?;
        Ok(state.warnings.get(&id).cloned())
    }

    async fn warnings_for_student(
        &self,
        student_id: &UserId,
    ) -> WarningRepositoryResult<Vec<Warning>> {
        let state = self.read()?;
        Ok(newest_first(
            state
                .warnings
                .values()
                .filter(|warning| warning.student_id() == student_id)
                .cloned()
                .collect(),
        ))
    }

    async fn warnings_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> WarningRepositoryResult<Vec<Warning>> {
        let state = self.read()?;
        Ok(newest_first(
            state
                .warnings
                .values()
                .filter(|warning| warning.mentor_id() == mentor_id)
                .cloned()
                .collect(),
        ))
    }
}
