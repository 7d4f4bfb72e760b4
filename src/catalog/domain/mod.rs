//! Domain model for courses and tasks.

mod course;
mod error;
mod ids;
mod task;

pub use course::{Course, PersistedCourseData};
pub use error::CatalogDomainError;
pub use ids::{CourseId, TaskId};
pub use task::{CatalogEntry, PersistedTaskData, Task, TaskChanges};
