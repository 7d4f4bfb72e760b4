//! In-memory user directory.

use crate::identity::{
    domain::{User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use crate::store::{InMemoryStore, StoreLockError};
use async_trait::async_trait;

impl From<StoreLockError> for UserDirectoryError {
    fn from(err: StoreLockError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn register(&self, user: &User) -> UserDirectoryResult<()> {
        let mut state = self.write()?;
        if state.users.contains_key(user.user_id()) {
            return Err(UserDirectoryError::DuplicateUser(user.user_id().clone()));
        }
        state.users.insert(user.user_id().clone(), user.clone());
        Ok(())
    }

    async fn find_user(&self, user_id: &UserId) -> UserDirectoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(user_id).cloned())
    }

    async fn highest_sequence(&self, prefix: &str) -> UserDirectoryResult<Option<u32>> {
        let state = self.read()?;
        Ok(state
            .users
            .keys()
            .filter(|user_id| user_id.as_str().starts_with(prefix))
            .filter_map(UserId::sequence)
            .max())
    }
}
