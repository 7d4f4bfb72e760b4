//! In-memory roster repository.

use crate::identity::domain::UserId;
use crate::roster::{
    domain::{Enrollment, MentorStudentLink, StudentProfile},
    ports::{RosterRepository, RosterRepositoryError, RosterRepositoryResult},
};
use crate::store::{InMemoryStore, StoreLockError};
use async_trait::async_trait;

impl From<StoreLockError> for RosterRepositoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

fn link_key(link: &MentorStudentLink) -> (UserId, UserId) {
    (link.mentor_id().clone(), link.student_id().clone())
}

#[async_trait]
impl RosterRepository for InMemoryStore {
    async fn enroll(&self, enrollment: &Enrollment) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        let student_id = enrollment.user.user_id();
        if state.users.contains_key(student_id) || state.profiles.contains_key(student_id) {
            return Err(RosterRepositoryError::DuplicateStudent(student_id.clone()));
        }
        state
            .users
            .insert(student_id.clone(), enrollment.user.clone());
        state
            .profiles
            .insert(student_id.clone(), enrollment.profile.clone());
        state
            .links
            .insert(link_key(&enrollment.link), enrollment.link.clone());
        Ok(())
    }

    async fn store_link(&self, link: &MentorStudentLink) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        let key = link_key(link);
        if state.links.contains_key(&key) {
            return Err(RosterRepositoryError::DuplicateLink {
                mentor_id: key.0,
                student_id: key.1,
            });
        }
        state.links.insert(key, link.clone());
        Ok(())
    }

    async fn update_link(&self, link: &MentorStudentLink) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        let key = link_key(link);
        let Some(stored) = state.links.get_mut(&key) else {
            return Err(RosterRepositoryError::LinkNotFound {
                mentor_id: key.0,
                student_id: key.1,
            });
        };
        *stored = link.clone();
        Ok(())
    }

    async fn find_link(
        &self,
        mentor_id: &UserId,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Option<MentorStudentLink>> {
        let state = self.read()?;
        Ok(state
            .links
            .get(&(mentor_id.clone(), student_id.clone()))
            .cloned())
    }

    async fn active_students(
        &self,
        mentor_id: &UserId,
    ) -> RosterRepositoryResult<Vec<StudentProfile>> {
        let state = self.read()?;
        let mut profiles: Vec<StudentProfile> = state
            .links
            .values()
            .filter(|link| link.is_active() && link.mentor_id() == mentor_id)
            .filter_map(|link| state.profiles.get(link.student_id()).cloned())
            .collect();
        profiles.sort_by(|left, right| left.student_id().cmp(right.student_id()));
        Ok(profiles)
    }

    async fn active_links_for_student(
        &self,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Vec<MentorStudentLink>> {
        let state = self.read()?;
        Ok(state
            .links
            .values()
            .filter(|link| link.is_active() && link.student_id() == student_id)
            .cloned()
            .collect())
    }

    async fn find_profile(
        &self,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Option<StudentProfile>> {
        let state = self.read()?;
        Ok(state.profiles.get(student_id).cloned())
    }

    async fn update_profile(&self, profile: &StudentProfile) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        let Some(stored) = state.profiles.get_mut(profile.student_id()) else {
            return Err(RosterRepositoryError::StudentNotFound(
                profile.student_id().clone(),
            ));
        };
        *stored = profile.clone();
        Ok(())
    }

    async fn remove_student(&self, student_id: &UserId) -> RosterRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.profiles.contains_key(student_id) && !state.users.contains_key(student_id) {
            return Err(RosterRepositoryError::StudentNotFound(student_id.clone()));
        }
        state.purge_student(student_id);
        Ok(())
    }
}
