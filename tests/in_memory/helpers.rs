//! Shared fixtures for platform integration tests.

use mentorship::{
    catalog::{
        domain::TaskId,
        services::{CreateCourseRequest, CreateTaskRequest},
    },
    config::MentorshipConfig,
    identity::{
        domain::{Identity, Role},
        services::RegisterUserRequest,
    },
    platform::Platform,
    roster::services::OnboardStudentRequest,
    store::InMemoryStore,
};
use rstest::fixture;

/// Mentor login used by every scenario.
pub const MENTOR_ID: &str = "26MEN0001";
/// Password shared by seeded accounts.
pub const PASSWORD: &str = "correct horse";

/// A platform seeded with one mentor, one student and one task.
pub struct Programme {
    pub platform: Platform<InMemoryStore>,
    pub mentor: Identity,
    pub student: Identity,
    pub task_id: TaskId,
}

impl Programme {
    /// Seeds a programme under `config`.
    pub async fn seed(config: MentorshipConfig) -> Self {
        let platform = Platform::in_memory(config);
        platform
            .identity()
            .register(RegisterUserRequest::new(MENTOR_ID, Role::Mentor, PASSWORD))
            .await
            .expect("mentor registration should succeed");
        let mentor = platform
            .identity()
            .resolve(MENTOR_ID, PASSWORD)
            .await
            .expect("mentor login should succeed");
        let enrollment = platform
            .roster()
            .onboard_student(&mentor, OnboardStudentRequest::new("Ada Lovelace", PASSWORD))
            .await
            .expect("onboarding should succeed");
        let student = platform
            .identity()
            .resolve(enrollment.user.user_id().as_str(), PASSWORD)
            .await
            .expect("student login should succeed");
        let course = platform
            .catalog()
            .create_course(&mentor, CreateCourseRequest::new("Backend"))
            .await
            .expect("course creation should succeed");
        let entry = platform
            .catalog()
            .create_task(
                &mentor,
                CreateTaskRequest::new(course.id(), "Build API", "REST endpoints"),
            )
            .await
            .expect("task creation should succeed");

        Self {
            platform,
            mentor,
            student,
            task_id: entry.task().id(),
        }
    }
}

/// Provides a programme with development configuration.
#[fixture]
pub async fn programme() -> Programme {
    Programme::seed(MentorshipConfig::development()).await
}
