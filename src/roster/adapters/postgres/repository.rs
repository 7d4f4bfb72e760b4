//! `PostgreSQL` roster repository implementation.

use super::models::{LinkRow, StudentRow};
use crate::identity::{adapters::postgres::user_to_new_row, domain::UserId};
use crate::roster::{
    domain::{
        Enrollment, MentorStudentLink, PersistedLinkData, PersistedProfileData, StudentName,
        StudentProfile,
    },
    ports::{RosterRepository, RosterRepositoryError, RosterRepositoryResult},
};
use crate::store::postgres::{
    PostgresStore, StoreAccessError,
    schema::{mentor_students, students, users},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeMap;

impl From<StoreAccessError> for RosterRepositoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for RosterRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl RosterRepository for PostgresStore {
    async fn enroll(&self, enrollment: &Enrollment) -> RosterRepositoryResult<()> {
        let student_id = enrollment.user.user_id().clone();
        let user_row = user_to_new_row(&enrollment.user);
        let profile_row = profile_to_row(&enrollment.profile)?;
        let link_row = link_to_row(&enrollment.link);

        self.run_blocking(move |connection| {
            connection.transaction::<_, RosterRepositoryError, _>(|tx| {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .execute(tx)
                    .map_err(|err| duplicate_student_or(err, &student_id))?;
                diesel::insert_into(students::table)
                    .values(&profile_row)
                    .execute(tx)
                    .map_err(|err| duplicate_student_or(err, &student_id))?;
                diesel::insert_into(mentor_students::table)
                    .values(&link_row)
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn store_link(&self, link: &MentorStudentLink) -> RosterRepositoryResult<()> {
        let mentor_id = link.mentor_id().clone();
        let student_id = link.student_id().clone();
        let row = link_to_row(link);
        self.run_blocking(move |connection| {
            diesel::insert_into(mentor_students::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RosterRepositoryError::DuplicateLink {
                            mentor_id: mentor_id.clone(),
                            student_id: student_id.clone(),
                        }
                    }
                    _ => RosterRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_link(&self, link: &MentorStudentLink) -> RosterRepositoryResult<()> {
        let mentor_id = link.mentor_id().clone();
        let student_id = link.student_id().clone();
        let is_active = link.is_active();
        let updated_at = link.updated_at();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                mentor_students::table
                    .filter(mentor_students::mentor_id.eq(mentor_id.as_str()))
                    .filter(mentor_students::student_id.eq(student_id.as_str())),
            )
            .set((
                mentor_students::is_active.eq(is_active),
                mentor_students::updated_at.eq(updated_at),
            ))
            .execute(connection)?;
            if updated == 0 {
                return Err(RosterRepositoryError::LinkNotFound {
                    mentor_id,
                    student_id,
                });
            }
            Ok(())
        })
        .await
    }

    async fn find_link(
        &self,
        mentor_id: &UserId,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Option<MentorStudentLink>> {
        let mentor = mentor_id.as_str().to_owned();
        let student = student_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = mentor_students::table
                .filter(mentor_students::mentor_id.eq(mentor))
                .filter(mentor_students::student_id.eq(student))
                .select(LinkRow::as_select())
                .first::<LinkRow>(connection)
                .optional()?;
            row.map(row_to_link).transpose()
        })
        .await
    }

    async fn active_students(
        &self,
        mentor_id: &UserId,
    ) -> RosterRepositoryResult<Vec<StudentProfile>> {
        let mentor = mentor_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = mentor_students::table
                .inner_join(students::table)
                .filter(mentor_students::mentor_id.eq(mentor))
                .filter(mentor_students::is_active.eq(true))
                .order(students::student_id.asc())
                .select(StudentRow::as_select())
                .load::<StudentRow>(connection)?;
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }

    async fn active_links_for_student(
        &self,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Vec<MentorStudentLink>> {
        let student = student_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = mentor_students::table
                .filter(mentor_students::student_id.eq(student))
                .filter(mentor_students::is_active.eq(true))
                .select(LinkRow::as_select())
                .load::<LinkRow>(connection)?;
            rows.into_iter().map(row_to_link).collect()
        })
        .await
    }

    async fn find_profile(
        &self,
        student_id: &UserId,
    ) -> RosterRepositoryResult<Option<StudentProfile>> {
        let student = student_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            find_profile_row(connection, &student)?
                .map(row_to_profile)
                .transpose()
        })
        .await
    }

    async fn update_profile(&self, profile: &StudentProfile) -> RosterRepositoryResult<()> {
        let student_id = profile.student_id().clone();
        let row = profile_to_row(profile)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                students::table.filter(students::student_id.eq(student_id.as_str())),
            )
            .set((
                students::name.eq(row.name),
                students::photo.eq(row.photo),
                students::social_links.eq(row.social_links),
                students::updated_at.eq(row.updated_at),
            ))
            .execute(connection)?;
            if updated == 0 {
                return Err(RosterRepositoryError::StudentNotFound(student_id));
            }
            Ok(())
        })
        .await
    }

    async fn remove_student(&self, student_id: &UserId) -> RosterRepositoryResult<()> {
        let student = student_id.clone();
        self.run_blocking(move |connection| {
            // Links, assignments, warnings and notifications cascade from users.
            let deleted =
                diesel::delete(users::table.filter(users::user_id.eq(student.as_str())))
                    .execute(connection)?;
            if deleted == 0 {
                return Err(RosterRepositoryError::StudentNotFound(student));
            }
            Ok(())
        })
        .await
    }
}

fn find_profile_row(
    connection: &mut PgConnection,
    student_id: &str,
) -> Result<Option<StudentRow>, DieselError> {
    students::table
        .filter(students::student_id.eq(student_id))
        .select(StudentRow::as_select())
        .first::<StudentRow>(connection)
        .optional()
}

fn duplicate_student_or(err: DieselError, student_id: &UserId) -> RosterRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RosterRepositoryError::DuplicateStudent(student_id.clone())
        }
        _ => RosterRepositoryError::persistence(err),
    }
}

fn parse_user_id(raw: &str) -> RosterRepositoryResult<UserId> {
    UserId::new(raw).map_err(|err| RosterRepositoryError::InvalidPersistedData(err.to_string()))
}

fn profile_to_row(profile: &StudentProfile) -> RosterRepositoryResult<StudentRow> {
    let social_links =
        serde_json::to_value(profile.social_links()).map_err(RosterRepositoryError::persistence)?;
    let warning_count =
        i32::try_from(profile.warning_count()).map_err(RosterRepositoryError::persistence)?;
    Ok(StudentRow {
        student_id: profile.student_id().as_str().to_owned(),
        name: profile.name().as_str().to_owned(),
        photo: profile.photo().map(str::to_owned),
        social_links,
        warning_count,
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    })
}

fn link_to_row(link: &MentorStudentLink) -> LinkRow {
    LinkRow {
        mentor_id: link.mentor_id().as_str().to_owned(),
        student_id: link.student_id().as_str().to_owned(),
        is_active: link.is_active(),
        assigned_at: link.assigned_at(),
        updated_at: link.updated_at(),
    }
}

fn row_to_profile(row: StudentRow) -> RosterRepositoryResult<StudentProfile> {
    let StudentRow {
        student_id,
        name: persisted_name,
        photo,
        social_links: persisted_links,
        warning_count: persisted_count,
        created_at,
        updated_at,
    } = row;

    let social_links = serde_json::from_value::<BTreeMap<String, String>>(persisted_links)
        .map_err(|err| RosterRepositoryError::InvalidPersistedData(err.to_string()))?;
    let warning_count = u32::try_from(persisted_count)
        .map_err(|err| RosterRepositoryError::InvalidPersistedData(err.to_string()))?;
    let name = StudentName::new(persisted_name)
        .map_err(|err| RosterRepositoryError::InvalidPersistedData(err.to_string()))?;

    Ok(StudentProfile::from_persisted(PersistedProfileData {
        student_id: parse_user_id(&student_id)?,
        name,
        photo,
        social_links,
        warning_count,
        created_at,
        updated_at,
    }))
}

fn row_to_link(row: LinkRow) -> RosterRepositoryResult<MentorStudentLink> {
    Ok(MentorStudentLink::from_persisted(PersistedLinkData {
        mentor_id: parse_user_id(&row.mentor_id)?,
        student_id: parse_user_id(&row.student_id)?,
        is_active: row.is_active,
        assigned_at: row.assigned_at,
        updated_at: row.updated_at,
    }))
}
