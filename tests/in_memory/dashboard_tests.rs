//! Dashboard projections over the wired platform.

use super::helpers::{Programme, programme};
use mentorship::assignment::services::SubmitRequest;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboards_reflect_submission(#[future(awt)] programme: Programme) {
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
    platform
        .assignments()
        .submit(
            &programme.student,
            programme.task_id,
            SubmitRequest::new().with_hosted_link("https://ada.example/api"),
        )
        .await
        .expect("submission should succeed");

    let mentor_view = platform
        .dashboards()
        .mentor_dashboard(&programme.mentor)
        .await
        .expect("mentor dashboard should load");
    let progress = platform
        .dashboards()
        .student_progress(&programme.student)
        .await
        .expect("progress should load");

    assert_eq!(mentor_view.active_students, 1);
    assert_eq!(mentor_view.awaiting_review, 1);
    assert_eq!(progress.completion_percentage, 100.0);
    assert_eq!(progress.courses.len(), 1);
}
