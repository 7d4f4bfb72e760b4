//! Service orchestration for the course and task catalog.

mod catalog;

pub use catalog::{
    CatalogError, CatalogResult, CreateCourseRequest, CreateTaskRequest, TaskCatalogService,
    owned_task,
};
