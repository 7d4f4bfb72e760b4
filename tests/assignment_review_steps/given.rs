//! Given steps for assignment review BDD scenarios.

use super::world::{ReviewWorld, run_async};
use eyre::WrapErr;
use mentorship::{
    catalog::services::{CreateCourseRequest, CreateTaskRequest},
    identity::{
        domain::{Identity, Role, UserId},
        services::RegisterUserRequest,
    },
    roster::services::OnboardStudentRequest,
};
use rstest_bdd_macros::given;

#[given("a mentor with an onboarded student")]
fn mentor_with_student(world: &mut ReviewWorld) -> Result<(), eyre::Report> {
    let platform = &world.platform;
    let mentor = run_async(async {
        platform
            .identity()
            .register(RegisterUserRequest::new("26MEN0001", Role::Mentor, "secret"))
            .await?;
        platform.identity().resolve("26MEN0001", "secret").await
    })
    .wrap_err("register mentor")?;
    let enrollment = run_async(
        platform
            .roster()
            .onboard_student(&mentor, OnboardStudentRequest::new("Ada", "secret")),
    )
    .wrap_err("onboard student")?;
    world.student = Some(enrollment.user.identity());
    world.mentor = Some(mentor);
    Ok(())
}

#[given(r#"the mentor has a task titled "{title}""#)]
fn mentor_has_task(world: &mut ReviewWorld, title: String) -> Result<(), eyre::Report> {
    let mentor: Identity = world.mentor()?.clone();
    let catalog = world.platform.catalog();
    let entry = run_async(async {
        let course = catalog
            .create_course(&mentor, CreateCourseRequest::new("Backend"))
            .await?;
        catalog
            .create_task(
                &mentor,
                CreateTaskRequest::new(course.id(), title, "Scenario task"),
            )
            .await
    })
    .wrap_err("create scenario task")?;
    world.task_id = Some(entry.task().id());
    Ok(())
}

#[given("the mentor has unlinked the student")]
fn mentor_unlinked_student(world: &mut ReviewWorld) -> Result<(), eyre::Report> {
    let student_id: UserId = world.student()?.user_id().clone();
    run_async(
        world
            .platform
            .roster()
            .unlink_student(world.mentor()?, &student_id),
    )
    .wrap_err("unlink student")?;
    Ok(())
}
