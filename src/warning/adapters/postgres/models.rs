//! Diesel row model for warnings.

use crate::store::postgres::schema::warnings;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for warnings.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = warnings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WarningRow {
    /// Warning identifier.
    pub id: uuid::Uuid,
    /// Warned student.
    pub student_id: String,
    /// Issuing mentor.
    pub mentor_id: String,
    /// Warning title.
    pub title: String,
    /// Mentor remark.
    pub remark: String,
    /// Canonical level string.
    pub level: String,
    /// Canonical status string.
    pub status: String,
    /// Student's resolution comment.
    pub resolution_comment: Option<String>,
    /// Resolution timestamp.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Issue timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
