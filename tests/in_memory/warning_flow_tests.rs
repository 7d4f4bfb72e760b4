//! Warning lifecycle across roster changes.

use super::helpers::{Programme, programme};
use mentorship::{
    error::{ClassifyError, ErrorKind},
    warning::{domain::WarningStatus, services::IssueWarningRequest},
};
use rstest::rstest;

fn late_warning(programme: &Programme) -> IssueWarningRequest {
    IssueWarningRequest::new(
        programme.student.user_id().as_str(),
        "Late submission",
        "Missed the Friday deadline",
        "high",
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issued_warning_is_resolved_by_student(#[future(awt)] programme: Programme) {
    let platform = &programme.platform;
    let issued = platform
        .warnings()
        .issue(&programme.mentor, late_warning(&programme))
        .await
        .expect("issue should succeed");
    assert_eq!(issued.warning_count, 1);

    let resolved = platform
        .warnings()
        .resolve(&programme.student, issued.warning.id(), "Will plan ahead")
        .await
        .expect("resolution should succeed");

    assert_eq!(resolved.status(), WarningStatus::Resolved);
    assert_eq!(resolved.remark(), "Missed the Friday deadline");
    let listing = platform
        .warnings()
        .list_for_student(&programme.student)
        .await
        .expect("listing should succeed");
    assert_eq!(listing.summary.total_issued(), 1);
    assert_eq!(listing.summary.resolved(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unlinked_mentor_cannot_warn(#[future(awt)] programme: Programme) {
    let platform = &programme.platform;
    platform
        .roster()
        .unlink_student(&programme.mentor, programme.student.user_id())
        .await
        .expect("unlink should succeed");

    let err = platform
        .warnings()
        .issue(&programme.mentor, late_warning(&programme))
        .await
        .expect_err("unlinked mentors cannot warn");

    assert_eq!(err.kind(), ErrorKind::Forbidden);
    let profile_listing = platform
        .warnings()
        .list_for_student(&programme.student)
        .await
        .expect("listing should succeed");
    assert_eq!(profile_listing.summary.total_issued(), 0);
}
