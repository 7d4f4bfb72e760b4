//! Domain tests for courses and tasks.

use crate::catalog::domain::{CatalogDomainError, Course, CourseId, Task, TaskChanges};
use crate::identity::domain::UserId;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("", "describe", CatalogDomainError::EmptyTaskTitle)]
#[case("Build API", "  ", CatalogDomainError::EmptyTaskDescription)]
fn blank_task_fields_are_rejected(
    #[case] title: &str,
    #[case] description: &str,
    #[case] expected: CatalogDomainError,
) {
    let result = Task::new(CourseId::new(), title, description, &DefaultClock);

    assert_eq!(result, Err(expected));
}

#[test]
fn blank_links_are_treated_as_absent() {
    let course = Course::new(
        UserId::new("26MEN001").expect("valid user ID"),
        "Backend",
        &DefaultClock,
    )
    .expect("valid course")
    .with_url("   ");
    let task = Task::new(course.id(), "Build API", "REST endpoints", &DefaultClock)
        .expect("valid task")
        .with_doc_link("");

    assert_eq!(course.url(), None);
    assert_eq!(task.doc_link(), None);
}

#[test]
fn failed_edit_leaves_task_untouched() {
    let mut task =
        Task::new(CourseId::new(), "Build API", "REST endpoints", &DefaultClock).expect("valid");
    let before = task.clone();

    let result = task.apply(
        TaskChanges::new().with_title("New title").with_description(" "),
        &DefaultClock,
    );

    assert_eq!(result, Err(CatalogDomainError::EmptyTaskDescription));
    assert_eq!(task, before);
}

#[test]
fn edit_replaces_supplied_fields() {
    let mut task = Task::new(CourseId::new(), "Build API", "REST endpoints", &DefaultClock)
        .expect("valid")
        .with_doc_link("https://docs.example/api");

    task.apply(TaskChanges::new().with_title(" Build GraphQL API "), &DefaultClock)
        .expect("edit should apply");

    assert_eq!(task.title(), "Build GraphQL API");
    assert_eq!(task.description(), "REST endpoints");
    assert_eq!(task.doc_link(), Some("https://docs.example/api"));
}
