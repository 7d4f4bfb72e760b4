//! `PostgreSQL` warning repository implementation.

use super::models::WarningRow;
use crate::identity::domain::UserId;
use crate::store::postgres::{
    PostgresStore, StoreAccessError,
    schema::{students, warnings},
};
use crate::warning::{
    domain::{PersistedWarningData, Warning, WarningId, WarningLevel, WarningStatus},
    ports::{WarningRepository, WarningRepositoryError, WarningRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl From<StoreAccessError> for WarningRepositoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for WarningRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl WarningRepository for PostgresStore {
    async fn issue_warning(&self, warning: &Warning) -> WarningRepositoryResult<u32> {
        let warning_id = warning.id();
        let student_id = warning.student_id().clone();
        let row = warning_to_row(warning);
        self.run_blocking(move |connection| {
            connection.transaction::<_, WarningRepositoryError, _>(|tx| {
                let count = diesel::update(
                    students::table.filter(students::student_id.eq(student_id.as_str())),
                )
                .set((
                    students::warning_count.eq(students::warning_count + 1),
                    students::updated_at.eq(row.created_at),
                ))
                .returning(students::warning_count)
                .get_result::<i32>(tx)
                .optional()?
                .ok_or_else(|| WarningRepositoryError::StudentNotFound(student_id.clone()))?;

                diesel::insert_into(warnings::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            WarningRepositoryError::DuplicateWarning(warning_id)
                        }
                        _ => WarningRepositoryError::persistence(err),
                    })?;

                u32::try_from(count)
                    .map_err(|err| WarningRepositoryError::InvalidPersistedData(err.to_string()))
            })
        })
        .await
    }

    async fn update_warning(
        &self,
        warning: &Warning,
        expected: WarningStatus,
    ) -> WarningRepositoryResult<()> {
        let id = warning.id();
        let row = warning_to_row(warning);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                warnings::table
                    .filter(warnings::id.eq(row.id))
                    .filter(warnings::status.eq(expected.as_str())),
            )
            .set((
                warnings::status.eq(row.status),
                warnings::resolution_comment.eq(row.resolution_comment),
                warnings::resolved_at.eq(row.resolved_at),
                warnings::updated_at.eq(row.updated_at),
            ))
            .execute(connection)?;
            if updated > 0 {
                return Ok(());
            }
            let exists = diesel::select(diesel::dsl::exists(
                warnings::table.filter(warnings::id.eq(id.into_inner())),
            ))
            .get_result::<bool>(connection)?;
            if exists {
                Err(WarningRepositoryError::StaleWarning { id, expected })
            } else {
                Err(WarningRepositoryError::NotFound(id))
            }
        })
        .await
    }

    async fn find_warning(&self, id: WarningId) -> WarningRepositoryResult<Option<Warning>> {
        self.run_blocking(move |connection| {
            let row = warnings::table
                .filter(warnings::id.eq(id.into_inner()))
                .select(WarningRow::as_select())
                .first::<WarningRow>(connection)
                .optional()?;
            row.map(row_to_warning).transpose()
        })
        .await
    }

    async fn warnings_for_student(
        &self,
        student_id: &UserId,
    ) -> WarningRepositoryResult<Vec<Warning>> {
        let student = student_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = warnings::table
                .filter(warnings::student_id.eq(student))
                .order(warnings::created_at.desc())
                .select(WarningRow::as_select())
                .load::<WarningRow>(connection)?;
            rows.into_iter().map(row_to_warning).collect()
        })
        .await
    }

    async fn warnings_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> WarningRepositoryResult<Vec<Warning>> {
        let mentor = mentor_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = warnings::table
                .filter(warnings::mentor_id.eq(mentor))
                .order(warnings::created_at.desc())
                .select(WarningRow::as_select())
                .load::<WarningRow>(connection)?;
            rows.into_iter().map(row_to_warning).collect()
        })
        .await
    }
}

fn warning_to_row(warning: &Warning) -> WarningRow {
    WarningRow {
        id: warning.id().into_inner(),
        student_id: warning.student_id().as_str().to_owned(),
        mentor_id: warning.mentor_id().as_str().to_owned(),
        title: warning.title().to_owned(),
        remark: warning.remark().to_owned(),
        level: warning.level().as_str().to_owned(),
        status: warning.status().as_str().to_owned(),
        resolution_comment: warning.resolution_comment().map(str::to_owned),
        resolved_at: warning.resolved_at(),
        created_at: warning.created_at(),
        updated_at: warning.updated_at(),
    }
}

fn invalid(err: &impl ToString) -> WarningRepositoryError {
    WarningRepositoryError::InvalidPersistedData(err.to_string())
}

fn row_to_warning(row: WarningRow) -> WarningRepositoryResult<Warning> {
    Ok(Warning::from_persisted(PersistedWarningData {
        id: WarningId::from_uuid(row.id),
        student_id: UserId::new(row.student_id).map_err(|err| invalid(&err))?,
        mentor_id: UserId::new(row.mentor_id).map_err(|err| invalid(&err))?,
        title: row.title,
        remark: row.remark,
        level: WarningLevel::try_from(row.level.as_str()).map_err(|err| invalid(&err))?,
        status: WarningStatus::try_from(row.status.as_str()).map_err(|err| invalid(&err))?,
        resolution_comment: row.resolution_comment,
        resolved_at: row.resolved_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
