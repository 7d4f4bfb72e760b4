//! When steps for assignment review BDD scenarios.

use super::world::{ReviewWorld, run_async};
use eyre::WrapErr;
use mentorship::{
    assignment::services::{ReviewRequest, SubmitRequest},
    error::ClassifyError,
    warning::services::IssueWarningRequest,
};
use rstest_bdd_macros::when;

#[when("the mentor assigns the task to the student")]
fn mentor_assigns(world: &mut ReviewWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    run_async(world.platform.assignments().assign(
        world.mentor()?,
        task_id,
        world.student()?.user_id(),
    ))
    .wrap_err("assign task")?;
    Ok(())
}

#[when(r#"the student submits "{link}""#)]
fn student_submits(world: &mut ReviewWorld, link: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let result = run_async(world.platform.assignments().submit(
        world.student()?,
        task_id,
        SubmitRequest::new().with_github_link(link),
    ));
    world.last_failure = result.err().map(|err| err.kind());
    Ok(())
}

#[when(r#"the mentor reviews the submission as "{status}" with remark "{remark}""#)]
fn mentor_reviews(
    world: &mut ReviewWorld,
    status: String,
    remark: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    run_async(world.platform.assignments().review(
        world.mentor()?,
        task_id,
        world.student()?.user_id(),
        ReviewRequest::new(status).with_remark(remark),
    ))
    .wrap_err("review submission")?;
    Ok(())
}

#[when(r#"the mentor issues a "{level}" warning titled "{title}""#)]
fn mentor_issues_warning(
    world: &mut ReviewWorld,
    level: String,
    title: String,
) -> Result<(), eyre::Report> {
    let request = IssueWarningRequest::new(
        world.student()?.user_id().as_str(),
        title,
        "Raised in scenario",
        level,
    );
    let result = run_async(world.platform.warnings().issue(world.mentor()?, request));
    world.last_failure = result.err().map(|err| err.kind());
    Ok(())
}
