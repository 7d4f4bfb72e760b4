//! Diesel row models for links and profiles.

use crate::store::postgres::schema::{mentor_students, students};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query and insert row for student profiles.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    /// Student identifier.
    pub student_id: String,
    /// Display name.
    pub name: String,
    /// Optional photo URL.
    pub photo: Option<String>,
    /// Social links JSON object.
    pub social_links: Value,
    /// Warning counter cache.
    pub warning_count: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert row for roster links.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = mentor_students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LinkRow {
    /// Mentor identifier.
    pub mentor_id: String,
    /// Student identifier.
    pub student_id: String,
    /// Activation flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub assigned_at: DateTime<Utc>,
    /// Last activation change.
    pub updated_at: DateTime<Utc>,
}
