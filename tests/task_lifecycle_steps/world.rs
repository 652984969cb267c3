//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use atelier::{
    repository::adapters::memory::InMemoryRepository,
    task::{
        domain::Task,
        services::{TaskLifecycleResult, TaskLifecycleService},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryRepository<Task>, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub service: TestTaskService,
    pub task: Option<Task>,
    pub last_result: Option<TaskLifecycleResult<Task>>,
}

impl TaskLifecycleWorld {
    /// Creates a world with an empty task store.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            task: None,
            last_result: None,
        }
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been captured yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Records an operation outcome, keeping the latest task on success.
    pub fn record(&mut self, result: TaskLifecycleResult<Task>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
