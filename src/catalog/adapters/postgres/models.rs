//! Diesel row models for courses and tasks.

use crate::store::postgres::schema::{courses, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for courses.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    /// Course identifier.
    pub id: uuid::Uuid,
    /// Owning mentor.
    pub mentor_id: String,
    /// Course title.
    pub title: String,
    /// Optional course URL.
    pub url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query and insert row for tasks.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning course.
    pub course_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Optional documentation link.
    pub doc_link: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}
