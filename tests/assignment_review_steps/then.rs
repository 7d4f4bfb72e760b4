//! Then steps for assignment review BDD scenarios.

use super::world::{ReviewWorld, run_async};
use eyre::WrapErr;
use mentorship::assignment::domain::AssignmentStatus;
use rstest_bdd_macros::then;

#[then(r#"the assignment status is "{status}""#)]
fn assignment_status_is(world: &ReviewWorld, status: String) -> Result<(), eyre::Report> {
    let expected = AssignmentStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task_id()?;
    let assignments = run_async(world.platform.assignments().list_for_student(world.student()?))
        .wrap_err("list student assignments")?;
    let assignment = assignments
        .iter()
        .find(|candidate| candidate.task_id() == task_id)
        .ok_or_else(|| eyre::eyre!("missing assignment for scenario task"))?;

    eyre::ensure!(
        assignment.status() == expected,
        "expected status {}, found {}",
        expected.as_str(),
        assignment.status().as_str()
    );
    Ok(())
}

#[then(r#"the student's latest notification reads "{message}""#)]
fn latest_notification_reads(world: &ReviewWorld, message: String) -> Result<(), eyre::Report> {
    let inbox = run_async(world.platform.notifications().list(world.student()?))
        .wrap_err("list notifications")?;
    let latest = inbox
        .first()
        .ok_or_else(|| eyre::eyre!("student inbox is empty"))?;

    eyre::ensure!(
        latest.message() == message,
        "expected notification {message:?}, found {:?}",
        latest.message()
    );
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &ReviewWorld, kind: String) -> Result<(), eyre::Report> {
    let failure = world
        .last_failure
        .ok_or_else(|| eyre::eyre!("expected the last operation to fail"))?;

    eyre::ensure!(
        failure.as_str() == kind,
        "expected {kind} failure, found {failure}"
    );
    Ok(())
}

#[then("the student has {count:u32} warnings on record")]
fn student_warning_count(world: &ReviewWorld, count: u32) -> Result<(), eyre::Report> {
    let listing = run_async(world.platform.warnings().list_for_student(world.student()?))
        .wrap_err("list student warnings")?;

    eyre::ensure!(
        listing.summary.total_issued() == count,
        "expected {count} warnings, found {}",
        listing.summary.total_issued()
    );
    Ok(())
}
