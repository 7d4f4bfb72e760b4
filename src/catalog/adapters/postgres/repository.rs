//! `PostgreSQL` catalog repository implementation.

use super::models::{CourseRow, TaskRow};
use crate::catalog::{
    domain::{
        CatalogEntry, Course, CourseId, PersistedCourseData, PersistedTaskData, Task, TaskId,
    },
    ports::{CatalogRepository, CatalogRepositoryError, CatalogRepositoryResult},
};
use crate::identity::domain::UserId;
use crate::store::postgres::{
    PostgresStore, StoreAccessError,
    schema::{courses, tasks},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl From<StoreAccessError> for CatalogRepositoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}

impl From<DieselError> for CatalogRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl CatalogRepository for PostgresStore {
    async fn store_course(&self, course: &Course) -> CatalogRepositoryResult<()> {
        let course_id = course.id();
        let row = course_to_row(course);
        self.run_blocking(move |connection| {
            diesel::insert_into(courses::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CatalogRepositoryError::DuplicateCourse(course_id)
                    }
                    _ => CatalogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_course(&self, id: CourseId) -> CatalogRepositoryResult<Option<Course>> {
        self.run_blocking(move |connection| {
            let row = courses::table
                .filter(courses::id.eq(id.into_inner()))
                .select(CourseRow::as_select())
                .first::<CourseRow>(connection)
                .optional()?;
            row.map(row_to_course).transpose()
        })
        .await
    }

    async fn courses_for_mentor(&self, mentor_id: &UserId) -> CatalogRepositoryResult<Vec<Course>> {
        let mentor = mentor_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = courses::table
                .filter(courses::mentor_id.eq(mentor))
                .order(courses::created_at.desc())
                .select(CourseRow::as_select())
                .load::<CourseRow>(connection)?;
            rows.into_iter().map(row_to_course).collect()
        })
        .await
    }

    async fn store_task(&self, task: &Task) -> CatalogRepositoryResult<()> {
        let task_id = task.id();
        let course_id = task.course_id();
        let row = task_to_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        CatalogRepositoryError::CourseNotFound(course_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CatalogRepositoryError::DuplicateTask(task_id)
                    }
                    _ => CatalogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> CatalogRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task);
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
                .set((
                    tasks::title.eq(row.title),
                    tasks::description.eq(row.description),
                    tasks::doc_link.eq(row.doc_link),
                    tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)?;
            if updated == 0 {
                return Err(CatalogRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_entry(&self, id: TaskId) -> CatalogRepositoryResult<Option<CatalogEntry>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .inner_join(courses::table)
                .filter(tasks::id.eq(id.into_inner()))
                .select((TaskRow::as_select(), CourseRow::as_select()))
                .first::<(TaskRow, CourseRow)>(connection)
                .optional()?;
            row.map(row_to_entry).transpose()
        })
        .await
    }

    async fn find_entries(&self, ids: &[TaskId]) -> CatalogRepositoryResult<Vec<CatalogEntry>> {
        let raw_ids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .inner_join(courses::table)
                .filter(tasks::id.eq_any(raw_ids))
                .select((TaskRow::as_select(), CourseRow::as_select()))
                .load::<(TaskRow, CourseRow)>(connection)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn entries_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> CatalogRepositoryResult<Vec<CatalogEntry>> {
        let mentor = mentor_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .inner_join(courses::table)
                .filter(courses::mentor_id.eq(mentor))
                .order(tasks::created_at.desc())
                .select((TaskRow::as_select(), CourseRow::as_select()))
                .load::<(TaskRow, CourseRow)>(connection)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn course_to_row(course: &Course) -> CourseRow {
    CourseRow {
        id: course.id().into_inner(),
        mentor_id: course.mentor_id().as_str().to_owned(),
        title: course.title().to_owned(),
        url: course.url().map(str::to_owned),
        created_at: course.created_at(),
    }
}

fn task_to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        course_id: task.course_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        doc_link: task.doc_link().map(str::to_owned),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_course(row: CourseRow) -> CatalogRepositoryResult<Course> {
    let mentor_id = UserId::new(row.mentor_id)
        .map_err(|err| CatalogRepositoryError::InvalidPersistedData(err.to_string()))?;
    Ok(Course::from_persisted(PersistedCourseData {
        id: CourseId::from_uuid(row.id),
        mentor_id,
        title: row.title,
        url: row.url,
        created_at: row.created_at,
    }))
}

fn row_to_task(row: TaskRow) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        course_id: CourseId::from_uuid(row.course_id),
        title: row.title,
        description: row.description,
        doc_link: row.doc_link,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_entry(
    (task_row, course_row): (TaskRow, CourseRow),
) -> CatalogRepositoryResult<CatalogEntry> {
    Ok(CatalogEntry::new(
        row_to_task(task_row),
        row_to_course(course_row)?,
    ))
}
