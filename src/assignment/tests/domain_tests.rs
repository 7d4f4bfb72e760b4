//! Domain tests for the assignment transition table and submissions.

use crate::assignment::domain::{
    AssignmentDomainError, AssignmentEvent, AssignmentStatus, ReviewPolicy, ReviewVerdict,
    SubmissionLinks, TaskAssignment,
};
use crate::catalog::domain::TaskId;
use crate::identity::domain::UserId;
use mockable::DefaultClock;
use rstest::rstest;

const APPROVE: AssignmentEvent = AssignmentEvent::Review(ReviewVerdict::Approved);
const REJECT: AssignmentEvent = AssignmentEvent::Review(ReviewVerdict::Rejected);

fn pending() -> TaskAssignment {
    TaskAssignment::assign(
        TaskId::new(),
        UserId::new("26STD0001").expect("valid user ID"),
        &DefaultClock,
    )
}

fn links() -> SubmissionLinks {
    SubmissionLinks::new(Some("https://github.com/ada/api".to_owned()), None)
        .expect("valid links")
}

#[rstest]
#[case(AssignmentStatus::Pending, AssignmentEvent::Submit, Some(AssignmentStatus::Submitted))]
#[case(AssignmentStatus::Rejected, AssignmentEvent::Submit, Some(AssignmentStatus::Submitted))]
#[case(AssignmentStatus::Submitted, AssignmentEvent::Submit, None)]
#[case(AssignmentStatus::Approved, AssignmentEvent::Submit, None)]
#[case(AssignmentStatus::Submitted, APPROVE, Some(AssignmentStatus::Approved))]
#[case(AssignmentStatus::Submitted, REJECT, Some(AssignmentStatus::Rejected))]
#[case(AssignmentStatus::Pending, APPROVE, None)]
#[case(AssignmentStatus::Rejected, REJECT, None)]
#[case(AssignmentStatus::Approved, REJECT, None)]
fn transitions_require_submission_by_default(
    #[case] from: AssignmentStatus,
    #[case] event: AssignmentEvent,
    #[case] expected: Option<AssignmentStatus>,
) {
    assert_eq!(from.apply(event, ReviewPolicy::default()), expected);
}

#[rstest]
#[case(AssignmentStatus::Pending, Some(AssignmentStatus::Approved))]
#[case(AssignmentStatus::Rejected, Some(AssignmentStatus::Approved))]
#[case(AssignmentStatus::Approved, None)]
fn override_policy_still_keeps_approval_terminal(
    #[case] from: AssignmentStatus,
    #[case] expected: Option<AssignmentStatus>,
) {
    assert_eq!(from.apply(APPROVE, ReviewPolicy::AllowOverride), expected);
}

#[rstest]
#[case(None, None)]
#[case(Some("   "), Some(""))]
fn submission_needs_at_least_one_link(
    #[case] github: Option<&str>,
    #[case] hosted: Option<&str>,
) {
    let result = SubmissionLinks::new(github.map(str::to_owned), hosted.map(str::to_owned));

    assert_eq!(result, Err(AssignmentDomainError::MissingSubmissionLink));
}

#[rstest]
#[case("github.com/ada/api")]
#[case("ftp://files.example/api")]
#[case("https://")]
fn submission_links_need_http_scheme(#[case] link: &str) {
    let result = SubmissionLinks::new(Some(link.to_owned()), None);

    assert!(matches!(result, Err(AssignmentDomainError::InvalidLink(_))));
}

#[test]
fn both_links_are_kept_trimmed() {
    let links = SubmissionLinks::new(
        Some(" https://github.com/ada/api ".to_owned()),
        Some("HTTP://ada.example".to_owned()),
    )
    .expect("valid links");

    assert_eq!(links.github_link(), Some("https://github.com/ada/api"));
    assert_eq!(links.hosted_link(), Some("HTTP://ada.example"));
}

#[test]
fn submit_records_links_and_timestamp() {
    let mut assignment = pending();

    let previous = assignment
        .submit(links(), &DefaultClock)
        .expect("pending work can be submitted");

    assert_eq!(previous, AssignmentStatus::Pending);
    assert_eq!(assignment.status(), AssignmentStatus::Submitted);
    assert_eq!(assignment.github_link(), Some("https://github.com/ada/api"));
    assert!(assignment.submitted_at().is_some());
}

#[test]
fn approved_assignment_rejects_further_changes() {
    let mut assignment = pending();
    assignment
        .submit(links(), &DefaultClock)
        .expect("pending work can be submitted");
    assignment
        .review(
            ReviewVerdict::Approved,
            Some("good".to_owned()),
            ReviewPolicy::default(),
            &DefaultClock,
        )
        .expect("submitted work can be reviewed");
    let snapshot = assignment.clone();

    let resubmit = assignment.submit(links(), &DefaultClock);
    let rereview = assignment.review(
        ReviewVerdict::Rejected,
        None,
        ReviewPolicy::AllowOverride,
        &DefaultClock,
    );

    assert_eq!(
        resubmit,
        Err(AssignmentDomainError::InvalidTransition {
            from: AssignmentStatus::Approved,
            event: AssignmentEvent::Submit,
        })
    );
    assert!(rereview.is_err());
    assert_eq!(assignment, snapshot);
}

#[test]
fn blank_remark_is_dropped() {
    let mut assignment = pending();
    assignment
        .submit(links(), &DefaultClock)
        .expect("pending work can be submitted");

    assignment
        .review(
            ReviewVerdict::Rejected,
            Some("  ".to_owned()),
            ReviewPolicy::default(),
            &DefaultClock,
        )
        .expect("submitted work can be reviewed");

    assert_eq!(assignment.mentor_remark(), None);
    assert!(assignment.reviewed_at().is_some());
}

#[rstest]
#[case("APPROVED", Ok(ReviewVerdict::Approved))]
#[case(" rejected", Ok(ReviewVerdict::Rejected))]
fn verdicts_parse_case_insensitively(
    #[case] raw: &str,
    #[case] expected: Result<ReviewVerdict, ()>,
) {
    assert_eq!(ReviewVerdict::try_from(raw).map_err(|_| ()), expected);
}

#[test]
fn pending_is_not_a_verdict() {
    assert!(ReviewVerdict::try_from("pending").is_err());
}
