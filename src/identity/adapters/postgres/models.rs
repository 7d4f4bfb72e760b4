//! Diesel row models for user persistence.

use crate::store::postgres::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    /// User identifier.
    pub user_id: String,
    /// Stored role.
    pub role: String,
    /// Login credential.
    pub credential: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    /// User identifier.
    pub user_id: String,
    /// Stored role.
    pub role: String,
    /// Login credential.
    pub credential: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
