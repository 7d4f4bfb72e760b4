//! Shared world state for assignment review BDD scenarios.

use mentorship::{
    catalog::domain::TaskId,
    config::MentorshipConfig,
    error::ErrorKind,
    identity::domain::Identity,
    platform::Platform,
    store::InMemoryStore,
};
use rstest::fixture;

/// Scenario world for assignment review behaviour tests.
pub struct ReviewWorld {
    pub platform: Platform<InMemoryStore>,
    pub mentor: Option<Identity>,
    pub student: Option<Identity>,
    pub task_id: Option<TaskId>,
    pub last_failure: Option<ErrorKind>,
}

impl ReviewWorld {
    /// Creates a world over an empty in-memory platform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            platform: Platform::in_memory(MentorshipConfig::development()),
            mentor: None,
            student: None,
            task_id: None,
            last_failure: None,
        }
    }

    /// Returns the seeded mentor.
    pub fn mentor(&self) -> Result<&Identity, eyre::Report> {
        self.mentor
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing mentor in scenario world"))
    }

    /// Returns the seeded student.
    pub fn student(&self) -> Result<&Identity, eyre::Report> {
        self.student
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing student in scenario world"))
    }

    /// Returns the scenario task.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for ReviewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReviewWorld {
    ReviewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
