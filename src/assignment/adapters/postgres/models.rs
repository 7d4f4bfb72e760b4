//! Diesel row model for task assignments.

use crate::store::postgres::schema::task_assignments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for task assignments.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssignmentRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Assigned task.
    pub task_id: uuid::Uuid,
    /// Assigned student.
    pub student_id: String,
    /// Submitted repository link.
    pub github_link: Option<String>,
    /// Submitted deployment link.
    pub hosted_link: Option<String>,
    /// Canonical status string.
    pub status: String,
    /// Mentor review remark.
    pub mentor_remark: Option<String>,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
    /// Latest submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Latest review timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
