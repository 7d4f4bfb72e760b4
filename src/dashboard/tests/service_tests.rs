//! Service tests for dashboard aggregation.

use std::sync::Arc;

use crate::assignment::services::{AssignmentLifecycleService, ReviewRequest, SubmitRequest};
use crate::catalog::{
    domain::TaskId,
    services::{CreateCourseRequest, CreateTaskRequest, TaskCatalogService},
};
use crate::dashboard::services::DashboardService;
use crate::error::{ClassifyError, ErrorKind};
use crate::identity::domain::{Cohort, Identity, Role, UserId};
use crate::roster::services::{OnboardStudentRequest, RosterService};
use crate::store::InMemoryStore;
use crate::warning::{
    domain::{WarningLevel, WarningStanding},
    services::{IssueWarningRequest, WarningLifecycleService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Harness {
    dashboards: DashboardService<InMemoryStore>,
    assignments: AssignmentLifecycleService<InMemoryStore, DefaultClock>,
    warnings: WarningLifecycleService<InMemoryStore, DefaultClock>,
    mentor: Identity,
    student: Identity,
    tasks: Vec<TaskId>,
}

impl Harness {
    async fn assign_all(&self) {
        for task_id in &self.tasks {
            self.assignments
                .assign(&self.mentor, *task_id, self.student.user_id())
                .await
                .expect("assignment should succeed");
        }
    }

    async fn submit(&self, task_id: TaskId) {
        self.assignments
            .submit(
                &self.student,
                task_id,
                SubmitRequest::new().with_hosted_link("https://ada.example"),
            )
            .await
            .expect("submission should succeed");
    }
}

#[fixture]
async fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let mentor = Identity::new(UserId::new("26MEN0001").expect("valid user ID"), Role::Mentor);
    let roster = RosterService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&clock),
        Cohort::DEFAULT,
    );
    let enrollment = roster
        .onboard_student(&mentor, OnboardStudentRequest::new("Ada", "pw"))
        .await
        .expect("onboarding should succeed");
    let catalog = TaskCatalogService::new(Arc::clone(&store), Arc::clone(&clock));
    let course = catalog
        .create_course(&mentor, CreateCourseRequest::new("Backend"))
        .await
        .expect("course creation should succeed");
    let mut tasks = Vec::new();
    for title in ["Models", "Routes", "Auth", "Deploy"] {
        let entry = catalog
            .create_task(
                &mentor,
                CreateTaskRequest::new(course.id(), title, "Build it"),
            )
            .await
            .expect("task creation should succeed");
        tasks.push(entry.task().id());
    }
    Harness {
        dashboards: DashboardService::new(Arc::clone(&store)),
        assignments: AssignmentLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
        warnings: WarningLifecycleService::new(store, clock),
        mentor,
        student: enrollment.user.identity(),
        tasks,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn progress_reports_three_of_four_submitted(#[future(awt)] harness: Harness) {
    harness.assign_all().await;
    for task_id in harness.tasks.iter().take(3) {
        harness.submit(*task_id).await;
    }

    let progress = harness
        .dashboards
        .student_progress(&harness.student)
        .await
        .expect("progress should load");

    assert_eq!(progress.tasks.total(), 4);
    assert_eq!(progress.tasks.submitted(), 3);
    assert_eq!(progress.completion_percentage, 75.0);
    assert_eq!(progress.courses.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn progress_without_assignments_is_zero(#[future(awt)] harness: Harness) {
    let progress = harness
        .dashboards
        .student_progress(&harness.student)
        .await
        .expect("progress should load");

    assert_eq!(progress.tasks.total(), 0);
    assert_eq!(progress.completion_percentage, 0.0);
    assert!(progress.courses.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn student_dashboard_combines_counts(#[future(awt)] harness: Harness) {
    harness.assign_all().await;
    let first = *harness.tasks.first().expect("tasks exist");
    harness.submit(first).await;
    harness
        .assignments
        .review(
            &harness.mentor,
            first,
            harness.student.user_id(),
            ReviewRequest::new("approved"),
        )
        .await
        .expect("review should succeed");
    harness
        .warnings
        .issue(
            &harness.mentor,
            IssueWarningRequest::new(
                harness.student.user_id().as_str(),
                "Late",
                "Missed deadline",
                "medium",
            ),
        )
        .await
        .expect("issue should succeed");

    let dashboard = harness
        .dashboards
        .student_dashboard(&harness.student)
        .await
        .expect("dashboard should load");

    assert_eq!(dashboard.assignments.total(), 4);
    assert_eq!(dashboard.assignments.approved(), 1);
    assert_eq!(dashboard.assignments.pending(), 3);
    assert_eq!(dashboard.active_mentors, 1);
    assert_eq!(dashboard.warnings.total_issued(), 1);
    assert_eq!(
        dashboard.warnings.standing(),
        WarningStanding::Warned(WarningLevel::Medium)
    );
    assert_eq!(dashboard.profile.warning_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mentor_dashboard_counts_students_and_reviews(#[future(awt)] harness: Harness) {
    harness.assign_all().await;
    for task_id in harness.tasks.iter().take(2) {
        harness.submit(*task_id).await;
    }

    let dashboard = harness
        .dashboards
        .mentor_dashboard(&harness.mentor)
        .await
        .expect("dashboard should load");

    assert_eq!(dashboard.active_students, 1);
    assert_eq!(dashboard.awaiting_review, 2);
    let course = dashboard.courses.first().expect("course should be listed");
    assert_eq!(course.course.title, "Backend");
    assert_eq!(course.assignments.total(), 4);
    assert_eq!(course.completion_percentage, 50.0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboards_enforce_roles(#[future(awt)] harness: Harness) {
    let as_mentor = harness
        .dashboards
        .student_dashboard(&harness.mentor)
        .await
        .expect_err("mentors have no student dashboard");
    let as_student = harness
        .dashboards
        .mentor_dashboard(&harness.student)
        .await
        .expect_err("students have no mentor dashboard");
    let unknown = harness
        .dashboards
        .student_progress(&Identity::new(
            UserId::new("26STD0099").expect("valid user ID"),
            Role::Student,
        ))
        .await
        .expect_err("unknown student must fail");

    assert_eq!(as_mentor.kind(), ErrorKind::Forbidden);
    assert_eq!(as_student.kind(), ErrorKind::Forbidden);
    assert_eq!(unknown.kind(), ErrorKind::NotFound);
}
