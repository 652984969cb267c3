//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, RefineTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
