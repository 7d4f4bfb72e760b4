//! Service tests for assigning, submitting and reviewing tasks.

use std::sync::Arc;

use crate::assignment::{
    domain::{AssignmentStatus, ReviewPolicy},
    ports::{AssignmentRepository, AssignmentRepositoryError},
    services::{AssignmentError, AssignmentLifecycleService, ReviewRequest, SubmitRequest},
};
use crate::catalog::{
    domain::TaskId,
    services::{CreateCourseRequest, CreateTaskRequest, TaskCatalogService},
};
use crate::error::{ClassifyError, ErrorKind};
use crate::identity::domain::{Cohort, Identity, Role, UserId};
use crate::notification::{domain::NotificationType, ports::NotificationRepository};
use crate::roster::services::{OnboardStudentRequest, RosterService};
use crate::store::InMemoryStore;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = AssignmentLifecycleService<InMemoryStore, DefaultClock>;

struct Harness {
    store: Arc<InMemoryStore>,
    service: TestService,
    mentor: Identity,
    student: Identity,
    task_id: TaskId,
}

impl Harness {
    async fn new(policy: ReviewPolicy) -> Self {
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
        let entry = catalog
            .create_task(
                &mentor,
                CreateTaskRequest::new(course.id(), "Build API", "REST endpoints"),
            )
            .await
            .expect("task creation should succeed");
        let service =
            AssignmentLifecycleService::new(Arc::clone(&store), clock).with_review_policy(policy);
        Self {
            store,
            service,
            mentor,
            student: enrollment.user.identity(),
            task_id: entry.task().id(),
        }
    }

    fn student_id(&self) -> &UserId {
        self.student.user_id()
    }

    async fn assign(&self) {
        self.service
            .assign(&self.mentor, self.task_id, self.student_id())
            .await
            .expect("assignment should succeed");
    }

    async fn submit(&self) -> Result<AssignmentStatus, AssignmentError> {
        self.service
            .submit(
                &self.student,
                self.task_id,
                SubmitRequest::new().with_github_link("https://github.com/ada/api"),
            )
            .await
            .map(|assignment| assignment.status())
    }

    async fn review(&self, status: &str, remark: &str) -> Result<AssignmentStatus, AssignmentError> {
        self.service
            .review(
                &self.mentor,
                self.task_id,
                self.student_id(),
                ReviewRequest::new(status).with_remark(remark),
            )
            .await
            .map(|assignment| assignment.status())
    }
}

#[fixture]
async fn harness() -> Harness {
    Harness::new(ReviewPolicy::RequireSubmission).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_creates_pending_work_and_notifies_student(#[future(awt)] harness: Harness) {
    let assignment = harness
        .service
        .assign(&harness.mentor, harness.task_id, harness.student_id())
        .await
        .expect("assignment should succeed");
    let inbox = harness
        .store
        .notifications_for(harness.student_id())
        .await
        .expect("inbox lookup should succeed");

    assert_eq!(assignment.status(), AssignmentStatus::Pending);
    let notice = inbox.first().expect("student should be notified");
    assert_eq!(notice.kind(), NotificationType::TaskAssigned);
    assert_eq!(notice.message(), "New task assigned: Build API");
    assert_eq!(notice.related_id(), Some(assignment.id().to_string().as_str()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_assignment_of_same_pair_conflicts(#[future(awt)] harness: Harness) {
    harness.assign().await;

    let err = harness
        .service
        .assign(&harness.mentor, harness.task_id, harness.student_id())
        .await
        .expect_err("duplicate assignment must fail");

    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigning_needs_task_ownership_and_active_link(#[future(awt)] harness: Harness) {
    let stranger = Identity::new(UserId::new("26MEN0002").expect("valid user ID"), Role::Mentor);

    let missing = harness
        .service
        .assign(&harness.mentor, TaskId::new(), harness.student_id())
        .await
        .expect_err("unknown task must fail");
    let foreign = harness
        .service
        .assign(&stranger, harness.task_id, harness.student_id())
        .await
        .expect_err("stranger cannot assign");
    let unlinked = harness
        .service
        .assign(
            &harness.mentor,
            harness.task_id,
            &UserId::new("26STD0099").expect("valid user ID"),
        )
        .await
        .expect_err("unlinked student must fail");

    assert_eq!(missing.kind(), ErrorKind::NotFound);
    assert_eq!(foreign.kind(), ErrorKind::Forbidden);
    assert!(matches!(unlinked, AssignmentError::Roster(_)));
    assert_eq!(unlinked.kind(), ErrorKind::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_without_links_is_invalid(#[future(awt)] harness: Harness) {
    harness.assign().await;

    let err = harness
        .service
        .submit(
            &harness.student,
            harness.task_id,
            SubmitRequest::new().with_hosted_link("  "),
        )
        .await
        .expect_err("missing links must fail");

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitting_unassigned_task_is_not_found(#[future(awt)] harness: Harness) {

    let err = harness
        .submit()
        .await
        .expect_err("unassigned task must fail");

    assert!(matches!(err, AssignmentError::NotAssigned { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn double_submission_conflicts(#[future(awt)] harness: Harness) {
    harness.assign().await;
    harness.submit().await.expect("first submission should succeed");

    let err = harness
        .submit()
        .await
        .expect_err("second submission must fail");

    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_work_can_be_resubmitted_and_approved(#[future(awt)] harness: Harness) {
    harness.assign().await;

    assert_eq!(harness.submit().await.ok(), Some(AssignmentStatus::Submitted));
    assert_eq!(
        harness.review("rejected", "fix tests").await.ok(),
        Some(AssignmentStatus::Rejected)
    );
    assert_eq!(harness.submit().await.ok(), Some(AssignmentStatus::Submitted));
    assert_eq!(
        harness.review("APPROVED", "good").await.ok(),
        Some(AssignmentStatus::Approved)
    );

    let listed = harness
        .service
        .list_for_student(&harness.student)
        .await
        .expect("listing should succeed");
    let stored = listed.first().expect("assignment should be listed");
    assert_eq!(stored.status(), AssignmentStatus::Approved);
    assert_eq!(stored.mentor_remark(), Some("good"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approved_work_stays_approved(#[future(awt)] harness: Harness) {
    harness.assign().await;
    harness.submit().await.expect("submission should succeed");
    harness
        .review("approved", "good")
        .await
        .expect("review should succeed");

    let resubmit = harness.submit().await.expect_err("approved is terminal");
    let rereview = harness
        .review("rejected", "changed my mind")
        .await
        .expect_err("approved is terminal");
    let listed = harness
        .service
        .list_for_mentor(&harness.mentor)
        .await
        .expect("listing should succeed");

    assert_eq!(resubmit.kind(), ErrorKind::Conflict);
    assert_eq!(rereview.kind(), ErrorKind::Conflict);
    assert_eq!(
        listed.first().map(|assignment| assignment.status()),
        Some(AssignmentStatus::Approved)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_verdict_is_invalid_input(#[future(awt)] harness: Harness) {
    harness.assign().await;
    harness.submit().await.expect("submission should succeed");

    let err = harness
        .review("pending", "")
        .await
        .expect_err("pending is not a verdict");

    assert!(matches!(err, AssignmentError::InvalidVerdict(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reviewing_pending_work_depends_on_policy(#[future(awt)] harness: Harness) {
    let strict = harness;
    strict.assign().await;
    let lenient = Harness::new(ReviewPolicy::AllowOverride).await;
    lenient.assign().await;

    let strict_err = strict
        .review("approved", "")
        .await
        .expect_err("pending work needs a submission");
    let lenient_status = lenient
        .review("approved", "")
        .await
        .expect("override policy allows review");

    assert_eq!(strict_err.kind(), ErrorKind::Conflict);
    assert_eq!(lenient_status, AssignmentStatus::Approved);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_by_id_notifies_with_remark(#[future(awt)] harness: Harness) {
    let assignment = harness
        .service
        .assign(&harness.mentor, harness.task_id, harness.student_id())
        .await
        .expect("assignment should succeed");
    harness.submit().await.expect("submission should succeed");

    harness
        .service
        .review_by_id(
            &harness.mentor,
            assignment.id(),
            ReviewRequest::new("rejected").with_remark("fix tests"),
        )
        .await
        .expect("review should succeed");
    let inbox = harness
        .store
        .notifications_for(harness.student_id())
        .await
        .expect("inbox lookup should succeed");

    let reviewed = inbox
        .iter()
        .find(|notification| notification.kind() == NotificationType::TaskReviewed)
        .expect("review notification should exist");
    assert_eq!(
        reviewed.message(),
        "Your submission for Build API was rejected: fix tests"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_notifications_do_not_block_assignment(#[future(awt)] harness: Harness) {
    let quiet = harness.service.clone().with_notifications(false);

    quiet
        .assign(&harness.mentor, harness.task_id, harness.student_id())
        .await
        .expect("assignment should succeed");
    let unread = harness
        .store
        .count_unread(harness.student_id())
        .await
        .expect("count should succeed");

    assert_eq!(unread, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_assignment_of_same_pair_succeeds_once(#[future(awt)] harness: Harness) {
    let assign = || {
        harness
            .service
            .assign(&harness.mentor, harness.task_id, harness.student_id())
    };

    let (first, second, third, fourth) = tokio::join!(assign(), assign(), assign(), assign());
    let outcomes = [first, second, third, fourth];

    let created = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(created, 1);
    for outcome in &outcomes {
        if let Err(err) = outcome {
            assert_eq!(err.kind(), ErrorKind::Conflict);
        }
    }
    let listed = harness
        .store
        .list_for_student(harness.student_id())
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_submissions_move_the_assignment_once(#[future(awt)] harness: Harness) {
    harness.assign().await;

    let (first, second) = tokio::join!(harness.submit(), harness.submit());

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    for outcome in &outcomes {
        if let Err(err) = outcome {
            assert_eq!(err.kind(), ErrorKind::Conflict);
        }
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_update_is_rejected_as_conflict(#[future(awt)] harness: Harness) {
    let stale = harness
        .service
        .assign(&harness.mentor, harness.task_id, harness.student_id())
        .await
        .expect("assignment should succeed");
    harness.submit().await.expect("submission should succeed");

    let err = harness
        .store
        .update(&stale, AssignmentStatus::Pending)
        .await
        .expect_err("stale write must be rejected");

    assert!(matches!(
        err,
        AssignmentRepositoryError::StaleAssignment {
            expected: AssignmentStatus::Pending,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let stored = harness
        .store
        .find_by_id(stale.id())
        .await
        .expect("lookup should succeed")
        .expect("assignment should exist");
    assert_eq!(stored.status(), AssignmentStatus::Submitted);
}
