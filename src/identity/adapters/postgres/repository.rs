//! `PostgreSQL` user directory implementation.

use super::models::{NewUserRow, UserRow};
use crate::identity::{
    domain::{Credential, PersistedUserData, Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use crate::store::postgres::{PostgresStore, StoreAccessError, schema::users};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl From<StoreAccessError> for UserDirectoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl UserDirectory for PostgresStore {
    async fn register(&self, user: &User) -> UserDirectoryResult<()> {
        let user_id = user.user_id().clone();
        let new_row = user_to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserDirectoryError::DuplicateUser(user_id.clone())
                    }
                    _ => UserDirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_user(&self, user_id: &UserId) -> UserDirectoryResult<Option<User>> {
        let lookup = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::user_id.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn highest_sequence(&self, prefix: &str) -> UserDirectoryResult<Option<u32>> {
        let pattern = format!("{prefix}%");
        self.run_blocking(move |connection| {
            let ids = users::table
                .filter(users::user_id.like(pattern))
                .select(users::user_id)
                .load::<String>(connection)
                .map_err(UserDirectoryError::persistence)?;
            Ok(ids
                .into_iter()
                .filter_map(|raw| UserId::new(raw).ok())
                .filter_map(|user_id| user_id.sequence())
                .max())
        })
        .await
    }
}

pub(crate) fn user_to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        user_id: user.user_id().as_str().to_owned(),
        role: user.role().as_str().to_owned(),
        credential: user.credential().expose().to_owned(),
        created_at: user.created_at(),
    }
}

fn row_to_user(row: UserRow) -> UserDirectoryResult<User> {
    let UserRow {
        user_id: persisted_id,
        role: persisted_role,
        credential: persisted_credential,
        created_at,
    } = row;

    let user_id = UserId::new(persisted_id)
        .map_err(|err| UserDirectoryError::InvalidPersistedData(err.to_string()))?;
    let role = Role::try_from(persisted_role.as_str())
        .map_err(|err| UserDirectoryError::InvalidPersistedData(err.to_string()))?;
    let credential = Credential::new(persisted_credential)
        .map_err(|err| UserDirectoryError::InvalidPersistedData(err.to_string()))?;

    Ok(User::from_persisted(PersistedUserData {
        user_id,
        role,
        credential,
        created_at,
    }))
}
