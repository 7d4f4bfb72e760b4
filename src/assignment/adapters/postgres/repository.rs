//! `PostgreSQL` assignment repository implementation.

use super::models::AssignmentRow;
use crate::assignment::{
    domain::{
        AssignmentId, AssignmentStatus, PersistedAssignmentData, TaskAssignment,
        sort_newest_submission_first,
    },
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};
use crate::catalog::domain::TaskId;
use crate::identity::domain::UserId;
use crate::store::postgres::{
    PostgresStore, StoreAccessError,
    schema::{courses, task_assignments, tasks},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl From<StoreAccessError> for AssignmentRepositoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for AssignmentRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl AssignmentRepository for PostgresStore {
    async fn insert(&self, assignment: &TaskAssignment) -> AssignmentRepositoryResult<()> {
        let task_id = assignment.task_id();
        let student_id = assignment.student_id().clone();
        let row = assignment_to_row(assignment);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_assignments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AssignmentRepositoryError::DuplicateAssignment {
                            task_id,
                            student_id,
                        }
                    }
                    _ => AssignmentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        assignment: &TaskAssignment,
        expected: AssignmentStatus,
    ) -> AssignmentRepositoryResult<()> {
        let id = assignment.id();
        let row = assignment_to_row(assignment);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                task_assignments::table
                    .filter(task_assignments::id.eq(row.id))
                    .filter(task_assignments::status.eq(expected.as_str())),
            )
            .set((
                task_assignments::github_link.eq(row.github_link),
                task_assignments::hosted_link.eq(row.hosted_link),
                task_assignments::status.eq(row.status),
                task_assignments::mentor_remark.eq(row.mentor_remark),
                task_assignments::submitted_at.eq(row.submitted_at),
                task_assignments::reviewed_at.eq(row.reviewed_at),
                task_assignments::updated_at.eq(row.updated_at),
            ))
            .execute(connection)?;
            if updated > 0 {
                return Ok(());
            }
            let exists = diesel::select(diesel::dsl::exists(
                task_assignments::table.filter(task_assignments::id.eq(id.into_inner())),
            ))
            .get_result::<bool>(connection)?;
            if exists {
                Err(AssignmentRepositoryError::StaleAssignment { id, expected })
            } else {
                Err(AssignmentRepositoryError::NotFound(id))
            }
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: AssignmentId,
    ) -> AssignmentRepositoryResult<Option<TaskAssignment>> {
        self.run_blocking(move |connection| {
            let row = task_assignments::table
                .filter(task_assignments::id.eq(id.into_inner()))
                .select(AssignmentRow::as_select())
                .first::<AssignmentRow>(connection)
                .optional()?;
            row.map(row_to_assignment).transpose()
        })
        .await
    }

    async fn find_by_pair(
        &self,
        task_id: TaskId,
        student_id: &UserId,
    ) -> AssignmentRepositoryResult<Option<TaskAssignment>> {
        let student = student_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = task_assignments::table
                .filter(task_assignments::task_id.eq(task_id.into_inner()))
                .filter(task_assignments::student_id.eq(student))
                .select(AssignmentRow::as_select())
                .first::<AssignmentRow>(connection)
                .optional()?;
            row.map(row_to_assignment).transpose()
        })
        .await
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskAssignment>> {
        let student = student_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = task_assignments::table
                .filter(task_assignments::student_id.eq(student))
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)?;
            collect_sorted(rows)
        })
        .await
    }

    async fn list_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskAssignment>> {
        let mentor = mentor_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = task_assignments::table
                .inner_join(tasks::table.inner_join(courses::table))
                .filter(courses::mentor_id.eq(mentor))
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)?;
            collect_sorted(rows)
        })
        .await
    }
}

fn collect_sorted(rows: Vec<AssignmentRow>) -> AssignmentRepositoryResult<Vec<TaskAssignment>> {
    let mut assignments = rows
        .into_iter()
        .map(row_to_assignment)
        .collect::<AssignmentRepositoryResult<Vec<_>>>()?;
    sort_newest_submission_first(&mut assignments);
    Ok(assignments)
}

fn assignment_to_row(assignment: &TaskAssignment) -> AssignmentRow {
    AssignmentRow {
        id: assignment.id().into_inner(),
        task_id: assignment.task_id().into_inner(),
        student_id: assignment.student_id().as_str().to_owned(),
        github_link: assignment.github_link().map(str::to_owned),
        hosted_link: assignment.hosted_link().map(str::to_owned),
        status: assignment.status().as_str().to_owned(),
        mentor_remark: assignment.mentor_remark().map(str::to_owned),
        assigned_at: assignment.assigned_at(),
        submitted_at: assignment.submitted_at(),
        reviewed_at: assignment.reviewed_at(),
        updated_at: assignment.updated_at(),
    }
}

fn row_to_assignment(row: AssignmentRow) -> AssignmentRepositoryResult<TaskAssignment> {
    let student_id = UserId::new(row.student_id)
        .map_err(|err| AssignmentRepositoryError::InvalidPersistedData(err.to_string()))?;
    let status = AssignmentStatus::try_from(row.status.as_str())
        .map_err(|err| AssignmentRepositoryError::InvalidPersistedData(err.to_string()))?;
    Ok(TaskAssignment::from_persisted(PersistedAssignmentData {
        id: AssignmentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        student_id,
        github_link: row.github_link,
        hosted_link: row.hosted_link,
        status,
        mentor_remark: row.mentor_remark,
        assigned_at: row.assigned_at,
        submitted_at: row.submitted_at,
        reviewed_at: row.reviewed_at,
        updated_at: row.updated_at,
    }))
}
