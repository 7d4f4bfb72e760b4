//! End-to-end assignment flow across the wired services.

use super::helpers::{Programme, programme};
use mentorship::{
    assignment::{
        domain::{AssignmentStatus, ReviewPolicy},
        services::{ReviewRequest, SubmitRequest},
    },
    config::MentorshipConfig,
    error::{ClassifyError, ErrorKind},
    notification::domain::NotificationType,
};
use rstest::rstest;

fn submission() -> SubmitRequest {
    SubmitRequest::new().with_github_link("https://github.com/ada/api")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn student_logs_in_with_derived_role(#[future(awt)] programme: Programme) {
    assert!(programme.student.user_id().as_str().starts_with("26STD"));
    assert!(programme.mentor.require_mentor().is_ok());
    assert!(programme.student.require_student().is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_work_can_be_resubmitted_and_approved(#[future(awt)] programme: Programme) {
    let platform = &programme.platform;
    let student_id = programme.student.user_id();
    platform
        .assignments()
        .assign(&programme.mentor, programme.task_id, student_id)
        .await
        .expect("assignment should succeed");
    platform
        .assignments()
        .submit(&programme.student, programme.task_id, submission())
        .await
        .expect("first submission should succeed");
    let rejected = platform
        .assignments()
        .review(
            &programme.mentor,
            programme.task_id,
            student_id,
            ReviewRequest::new("rejected").with_remark("fix tests"),
        )
        .await
        .expect("rejection should succeed");
    assert_eq!(rejected.status(), AssignmentStatus::Rejected);

    platform
        .assignments()
        .submit(&programme.student, programme.task_id, submission())
        .await
        .expect("resubmission should succeed");
    let approved = platform
        .assignments()
        .review(
            &programme.mentor,
            programme.task_id,
            student_id,
            ReviewRequest::new("approved").with_remark("good"),
        )
        .await
        .expect("approval should succeed");
    assert_eq!(approved.status(), AssignmentStatus::Approved);
    assert_eq!(approved.mentor_remark(), Some("good"));

    let inbox = platform
        .notifications()
        .list(&programme.student)
        .await
        .expect("inbox should load");
    let kinds: Vec<NotificationType> = inbox.iter().map(|item| item.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NotificationType::TaskReviewed,
            NotificationType::TaskReviewed,
            NotificationType::TaskAssigned,
            NotificationType::CourseCreated,
        ]
    );
    let latest = inbox.first().expect("inbox has entries");
    assert_eq!(
        latest.message(),
        "Your submission for Build API was approved: good"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approved_work_rejects_resubmission(#[future(awt)] programme: Programme) {
    let platform = &programme.platform;
    let student_id = programme.student.user_id();
    platform
        .assignments()
        .assign(&programme.mentor, programme.task_id, student_id)
        .await
        .expect("assignment should succeed");
    platform
        .assignments()
        .submit(&programme.student, programme.task_id, submission())
        .await
        .expect("submission should succeed");
    platform
        .assignments()
        .review(
            &programme.mentor,
            programme.task_id,
            student_id,
            ReviewRequest::new("approved"),
        )
        .await
        .expect("approval should succeed");

    let err = platform
        .assignments()
        .submit(&programme.student, programme.task_id, submission())
        .await
        .expect_err("approved work is terminal");

    assert_eq!(err.kind(), ErrorKind::Conflict);
    let client = platform.client_error(&err);
    assert_eq!(client.kind(), ErrorKind::Conflict);
}

#[rstest]
#[case(ReviewPolicy::RequireSubmission, Some(ErrorKind::Conflict))]
#[case(ReviewPolicy::AllowOverride, None)]
#[tokio::test(flavor = "multi_thread")]
async fn review_policy_comes_from_configuration(
    #[case] policy: ReviewPolicy,
    #[case] expected: Option<ErrorKind>,
) {
    let programme =
        Programme::seed(MentorshipConfig::development().with_review_policy(policy)).await;
    let platform = &programme.platform;
    platform
        .assignments()
        .assign(
            &programme.mentor,
            programme.task_id,
            programme.student.user_id(),
        )
        .await
        .expect("assignment should succeed");

    let result = platform
        .assignments()
        .review(
            &programme.mentor,
            programme.task_id,
            programme.student.user_id(),
            ReviewRequest::new("approved"),
        )
        .await;

    assert_eq!(result.err().map(|err| err.kind()), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_notifications_leave_inbox_empty() {
    let programme =
        Programme::seed(MentorshipConfig::development().with_notifications(false)).await;
    programme
        .platform
        .assignments()
        .assign(
            &programme.mentor,
            programme.task_id,
            programme.student.user_id(),
        )
        .await
        .expect("assignment should succeed");

    let unread = programme
        .platform
        .notifications()
        .unread_count(&programme.student)
        .await
        .expect("count should load");

    assert_eq!(unread, 0);
}
