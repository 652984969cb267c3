//! Shared fixtures for service-level integration tests.

use std::sync::Arc;

use atelier::{
    decision::{domain::Decision, services::DecisionLogService},
    employee::{domain::Employee, services::StaffingService},
    project::{domain::Project, services::PortfolioService},
    repo::{domain::Repo, services::RepoService},
    repository::adapters::memory::InMemoryRepository,
    task::{
        domain::Task,
        services::{RefineTaskRequest, TaskLifecycleService},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Task store shared between services.
pub type TaskStore = InMemoryRepository<Task>;
/// Employee store shared between services.
pub type EmployeeStore = InMemoryRepository<Employee>;
/// Repo store shared between services.
pub type RepoStore = InMemoryRepository<Repo>;

/// Every service wired to one set of in-memory stores.
pub struct Workspace {
    pub tasks: TaskLifecycleService<TaskStore, DefaultClock>,
    pub staffing: StaffingService<EmployeeStore, TaskStore, DefaultClock>,
    pub decisions: DecisionLogService<InMemoryRepository<Decision>, DefaultClock>,
    pub portfolio: PortfolioService<InMemoryRepository<Project>, RepoStore, DefaultClock>,
    pub repos: RepoService<RepoStore, EmployeeStore, DefaultClock>,
    pub task_store: Arc<TaskStore>,
    pub employee_store: Arc<EmployeeStore>,
}

impl Workspace {
    /// Creates services over empty stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let task_store = Arc::new(TaskStore::new());
        let employee_store = Arc::new(EmployeeStore::new());
        let repo_store = Arc::new(RepoStore::new());

        Self {
            tasks: TaskLifecycleService::new(Arc::clone(&task_store), Arc::clone(&clock)),
            staffing: StaffingService::new(
                Arc::clone(&employee_store),
                Arc::clone(&task_store),
                Arc::clone(&clock),
            ),
            decisions: DecisionLogService::new(
                Arc::new(InMemoryRepository::new()),
                Arc::clone(&clock),
            ),
            portfolio: PortfolioService::new(
                Arc::new(InMemoryRepository::new()),
                Arc::clone(&repo_store),
                Arc::clone(&clock),
            ),
            repos: RepoService::new(repo_store, Arc::clone(&employee_store), clock),
            task_store,
            employee_store,
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a fresh workspace for each test.
#[fixture]
pub fn workspace() -> Workspace {
    Workspace::new()
}

/// Refinement that makes a task eligible for `Ready`.
#[must_use]
pub fn ready_refinement() -> RefineTaskRequest {
    RefineTaskRequest::new()
        .with_title("Build X")
        .with_description("desc")
        .with_requirements(["r1".to_owned()])
}
