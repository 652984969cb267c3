//! Shared world state for staffing BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use atelier::{
    employee::{domain::Employee, services::StaffingService},
    entity::{EmployeeId, TaskId},
    repository::adapters::memory::InMemoryRepository,
    service::{ServiceError, ServiceResponse},
    task::{domain::Task, services::TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

type EmployeeStore = InMemoryRepository<Employee>;
type TaskStore = InMemoryRepository<Task>;

/// Scenario world for staffing behaviour tests.
pub struct StaffingWorld {
    pub staffing: StaffingService<EmployeeStore, TaskStore, DefaultClock>,
    pub tasks: TaskLifecycleService<TaskStore, DefaultClock>,
    pub employee_id: Option<EmployeeId>,
    pub task_ids: HashMap<String, TaskId>,
    pub last_response: Option<ServiceResponse<()>>,
}

impl StaffingWorld {
    /// Creates a world whose services share one task store.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let task_store = Arc::new(TaskStore::new());

        Self {
            staffing: StaffingService::new(
                Arc::new(EmployeeStore::new()),
                Arc::clone(&task_store),
                Arc::clone(&clock),
            ),
            tasks: TaskLifecycleService::new(task_store, clock),
            employee_id: None,
            task_ids: HashMap::new(),
            last_response: None,
        }
    }

    /// Returns the hired employee's identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when no employee has been hired yet.
    pub fn employee_id(&self) -> Result<EmployeeId, eyre::Report> {
        self.employee_id
            .clone()
            .ok_or_else(|| eyre::eyre!("missing employee in scenario world"))
    }

    /// Returns the identifier of a task created under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created under that name.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("unknown task {name} in scenario world"))
    }

    /// Records the outcome of a service call without its payload.
    pub fn record<T, E: ServiceError>(&mut self, result: Result<T, E>) {
        self.last_response = Some(result.map(|_| ()).into());
    }
}

impl Default for StaffingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> StaffingWorld {
    StaffingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
