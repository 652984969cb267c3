//! Domain model for the task lifecycle.
//!
//! A task starts as raw, unstructured input and is refined until it is
//! specific enough to be picked up by a single worker. Infrastructure
//! concerns stay outside the domain boundary.

mod error;
mod state;
mod task;

pub use error::{ParseTaskStateError, TaskDomainError};
pub use state::TaskState;
pub use task::{PersistedTaskData, Task};
