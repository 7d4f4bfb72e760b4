//! Service tests for issuing and resolving warnings.

use std::sync::Arc;

use crate::error::{ClassifyError, ErrorKind};
use crate::identity::domain::{Cohort, Identity, Role, UserId};
use crate::notification::{domain::NotificationType, ports::NotificationRepository};
use crate::roster::{
    ports::RosterRepository,
    services::{OnboardStudentRequest, RosterService},
};
use crate::store::InMemoryStore;
use crate::warning::{
    domain::{WarningId, WarningLevel, WarningStatus},
    ports::{WarningRepository, WarningRepositoryError},
    services::{IssueWarningRequest, WarningError, WarningLifecycleService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = WarningLifecycleService<InMemoryStore, DefaultClock>;

struct Harness {
    store: Arc<InMemoryStore>,
    service: TestService,
    mentor: Identity,
    student: Identity,
}

impl Harness {
    fn student_id(&self) -> &str {
        self.student.user_id().as_str()
    }

    fn request(&self, level: &str) -> IssueWarningRequest {
        IssueWarningRequest::new(self.student_id(), "Missed standups", "Three in a row", level)
    }

    async fn warning_count(&self) -> u32 {
        self.store
            .find_profile(self.student.user_id())
            .await
            .expect("profile lookup should succeed")
            .expect("profile should exist")
            .warning_count()
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
    let service = WarningLifecycleService::new(Arc::clone(&store), clock);
    Harness {
        store,
        service,
        mentor,
        student: enrollment.user.identity(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issuing_increments_counter_and_notifies(#[future(awt)] harness: Harness) {
    let first = harness
        .service
        .issue(&harness.mentor, harness.request("high").with_status("ACTIVE"))
        .await
        .expect("issue should succeed");
    let second = harness
        .service
        .issue(&harness.mentor, harness.request("low"))
        .await
        .expect("issue should succeed");
    let inbox = harness
        .store
        .notifications_for(harness.student.user_id())
        .await
        .expect("inbox lookup should succeed");

    assert_eq!(first.warning_count, 1);
    assert_eq!(second.warning_count, 2);
    assert_eq!(harness.warning_count().await, 2);
    assert_eq!(first.warning.status(), WarningStatus::Active);
    assert!(inbox.iter().any(|notification| {
        notification.kind() == NotificationType::WarningIssued
            && notification.message() == "You received a high warning: Missed standups"
    }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issuing_without_active_link_is_forbidden(#[future(awt)] harness: Harness) {
    let stranger = Identity::new(UserId::new("26MEN0002").expect("valid user ID"), Role::Mentor);

    let err = harness
        .service
        .issue(&stranger, harness.request("medium"))
        .await
        .expect_err("unlinked mentor must fail");

    assert!(matches!(err, WarningError::Roster(_)));
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(harness.warning_count().await, 0);
}

#[rstest]
#[case(IssueWarningRequest::new("26STD0001", "Late", "Again", "severe"))]
#[case(IssueWarningRequest::new("26STD0001", "", "Again", "low"))]
#[case(IssueWarningRequest::new("26STD0001", "Late", "Again", "low").with_status("resolved"))]
#[case(IssueWarningRequest::new("26STD0001", "Late", "Again", "low").with_status("dormant"))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_warning_fields_are_rejected(
    #[future(awt)] harness: Harness,
    #[case] request: IssueWarningRequest,
) {
    let err = harness
        .service
        .issue(&harness.mentor, request)
        .await
        .expect_err("invalid fields must fail");

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(harness.warning_count().await, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolving_twice_conflicts_and_counter_stays(#[future(awt)] harness: Harness) {
    let issued = harness
        .service
        .issue(&harness.mentor, harness.request("low"))
        .await
        .expect("issue should succeed");
    let warning_id = issued.warning.id();

    let resolved = harness
        .service
        .resolve(&harness.student, warning_id, "Will attend")
        .await
        .expect("resolution should succeed");
    let again = harness
        .service
        .resolve(&harness.student, warning_id, "Really")
        .await
        .expect_err("second resolution must fail");

    assert_eq!(resolved.status(), WarningStatus::Resolved);
    assert_eq!(resolved.remark(), "Three in a row");
    assert_eq!(again.kind(), ErrorKind::Conflict);
    assert_eq!(harness.warning_count().await, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_warned_student_can_resolve(#[future(awt)] harness: Harness) {
    let issued = harness
        .service
        .issue(&harness.mentor, harness.request("low"))
        .await
        .expect("issue should succeed");
    let other = Identity::new(UserId::new("26STD0042").expect("valid user ID"), Role::Student);

    let foreign = harness
        .service
        .resolve(&other, issued.warning.id(), "not mine")
        .await
        .expect_err("foreign warning must fail");
    let missing = harness
        .service
        .resolve(&harness.student, WarningId::new(), "nothing")
        .await
        .expect_err("unknown warning must fail");

    assert_eq!(foreign.kind(), ErrorKind::Forbidden);
    assert_eq!(missing.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn student_listing_reports_counts(#[future(awt)] harness: Harness) {
    let issued = harness
        .service
        .issue(&harness.mentor, harness.request("critical"))
        .await
        .expect("issue should succeed");
    harness
        .service
        .issue(&harness.mentor, harness.request("low"))
        .await
        .expect("issue should succeed");
    harness
        .service
        .resolve(&harness.student, issued.warning.id(), "Understood")
        .await
        .expect("resolution should succeed");

    let listing = harness
        .service
        .list_for_student(&harness.student)
        .await
        .expect("listing should succeed");
    let issued_by_mentor = harness
        .service
        .list_for_mentor(&harness.mentor)
        .await
        .expect("listing should succeed");

    assert_eq!(listing.warnings.len(), 2);
    assert_eq!(listing.summary.total_issued(), 2);
    assert_eq!(listing.summary.active(), 1);
    assert_eq!(listing.summary.resolved(), 1);
    assert_eq!(listing.summary.at_level(WarningLevel::Critical), 1);
    assert_eq!(issued_by_mentor.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_issues_each_increment_the_counter(#[future(awt)] harness: Harness) {
    let issue = |level: &'static str| harness.service.issue(&harness.mentor, harness.request(level));

    let (first, second, third, fourth, fifth) = tokio::join!(
        issue("low"),
        issue("medium"),
        issue("high"),
        issue("critical"),
        issue("low"),
    );

    let mut counts: Vec<u32> = [first, second, third, fourth, fifth]
        .into_iter()
        .map(|outcome| outcome.expect("issue should succeed").warning_count)
        .collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![1, 2, 3, 4, 5]);
    assert_eq!(harness.warning_count().await, 5);
    let stored = harness
        .store
        .warnings_for_student(harness.student.user_id())
        .await
        .expect("listing should succeed");
    assert_eq!(stored.len(), 5);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_resolutions_resolve_once(#[future(awt)] harness: Harness) {
    let issued = harness
        .service
        .issue(&harness.mentor, harness.request("low"))
        .await
        .expect("issue should succeed");
    let warning_id = issued.warning.id();

    let (first, second) = tokio::join!(
        harness.service.resolve(&harness.student, warning_id, "Sorry"),
        harness.service.resolve(&harness.student, warning_id, "Sorry again"),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    for outcome in &outcomes {
        if let Err(err) = outcome {
            assert_eq!(err.kind(), ErrorKind::Conflict);
        }
    }
    assert_eq!(harness.warning_count().await, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_warning_update_is_rejected_as_conflict(#[future(awt)] harness: Harness) {
    let issued = harness
        .service
        .issue(&harness.mentor, harness.request("medium"))
        .await
        .expect("issue should succeed");
    harness
        .service
        .resolve(&harness.student, issued.warning.id(), "Understood")
        .await
        .expect("resolution should succeed");

    let err = harness
        .store
        .update_warning(&issued.warning, WarningStatus::Active)
        .await
        .expect_err("stale write must be rejected");

    assert!(matches!(
        err,
        WarningRepositoryError::StaleWarning {
            expected: WarningStatus::Active,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    let stored = harness
        .store
        .find_warning(issued.warning.id())
        .await
        .expect("lookup should succeed")
        .expect("warning should exist");
    assert_eq!(stored.status(), WarningStatus::Resolved);
}
