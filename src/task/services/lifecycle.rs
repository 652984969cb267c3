//! Service layer for task creation, refinement, and transitions.

use crate::{
    entity::{EmployeeId, TaskId},
    repository::ports::{Criteria, Repository, RepositoryError},
    service::{ErrorCode, ServiceError},
    task::domain::{Task, TaskDomainError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for capturing a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    raw_task: String,
    parent_task_id: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request from raw task input.
    #[must_use]
    pub fn new(raw_task: impl Into<String>) -> Self {
        Self {
            raw_task: raw_task.into(),
            parent_task_id: None,
        }
    }

    /// Decomposes the new task from an existing parent.
    #[must_use]
    pub fn with_parent(mut self, parent_task_id: impl Into<String>) -> Self {
        self.parent_task_id = Some(parent_task_id.into());
        self
    }
}

/// Field changes applied together to refine a task.
///
/// Unset fields are left as they are. Either every change is applied or
/// none is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefineTaskRequest {
    title: Option<String>,
    description: Option<String>,
    requirements: Option<Vec<String>>,
    acceptance_criteria: Option<Vec<String>>,
    plan: Option<String>,
    ideal_candidate: Option<String>,
}

impl RefineTaskRequest {
    /// Creates an empty refinement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the requirements.
    #[must_use]
    pub fn with_requirements(mut self, requirements: impl IntoIterator<Item = String>) -> Self {
        self.requirements = Some(requirements.into_iter().collect());
        self
    }

    /// Replaces the acceptance criteria.
    #[must_use]
    pub fn with_acceptance_criteria(mut self, criteria: impl IntoIterator<Item = String>) -> Self {
        self.acceptance_criteria = Some(criteria.into_iter().collect());
        self
    }

    /// Sets the plan.
    #[must_use]
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// Sets the ideal candidate description.
    #[must_use]
    pub fn with_ideal_candidate(mut self, candidate: impl Into<String>) -> Self {
        self.ideal_candidate = Some(candidate.into());
        self
    }

    fn apply(self, task: &mut Task, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if let Some(title) = self.title {
            task.set_title(title, clock)?;
        }
        if let Some(description) = self.description {
            task.set_description(description, clock)?;
        }
        if let Some(requirements) = self.requirements {
            task.set_requirements(requirements, clock)?;
        }
        if let Some(criteria) = self.acceptance_criteria {
            task.set_acceptance_criteria(criteria, clock);
        }
        if let Some(plan) = self.plan {
            task.set_plan(plan, clock);
        }
        if let Some(candidate) = self.ideal_candidate {
            task.set_ideal_candidate(candidate, clock);
        }
        Ok(())
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError for TaskLifecycleError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Domain(err) => err.kind().into(),
            Self::Repository(err) => err.code(),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: Repository<Task>,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: Repository<Task>,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Captures a new `Open` task, optionally under an existing parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the input is invalid, or
    /// [`TaskLifecycleError::Repository`] when the parent does not exist or
    /// persistence fails.
    #[instrument(skip(self, request))]
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            raw_task,
            parent_task_id,
        } = request;

        let task = match parent_task_id {
            Some(raw_parent) => {
                let parent_id = TaskId::parse(raw_parent).map_err(TaskDomainError::from)?;
                if !self.repository.exists(&parent_id).await? {
                    return Err(RepositoryError::not_found::<Task>(&parent_id).into());
                }
                Task::new_subtask(raw_task, parent_id, &*self.clock)?
            }
            None => Task::new(raw_task, &*self.clock)?,
        };

        let stored = self.repository.create(&task).await?;
        info!(task_id = %stored.id(), parent = ?stored.parent_task_id(), "task created");
        Ok(stored)
    }

    /// Finds a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: &TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists tasks matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_tasks(&self, criteria: &Criteria) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_all(criteria).await?)
    }

    /// Lists the tasks decomposed from `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_subtasks(&self, parent_id: &TaskId) -> TaskLifecycleResult<Vec<Task>> {
        let criteria = Criteria::all().with_field("parentTaskId", parent_id.as_str());
        self.list_tasks(&criteria).await
    }

    /// Applies a set of field changes to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when any change is invalid; the
    /// stored task is then left unchanged.
    #[instrument(skip(self, request), fields(task_id = %id))]
    pub async fn refine_task(
        &self,
        id: &TaskId,
        request: RefineTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        self.apply(id, "refine", move |task, clock| request.apply(task, clock))
            .await
    }

    /// Records the employee a task is assigned to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not exist
    /// or persistence fails.
    #[instrument(skip(self), fields(task_id = %id, employee_id = %employee_id))]
    pub async fn assign_task(
        &self,
        id: &TaskId,
        employee_id: EmployeeId,
    ) -> TaskLifecycleResult<Task> {
        self.apply(id, "assign", move |task, clock| {
            task.assign_to(employee_id, clock);
            Ok(())
        })
        .await
    }

    /// Marks an `Open` task as `Ready`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is incomplete or
    /// not `Open`.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn mark_ready(&self, id: &TaskId) -> TaskLifecycleResult<Task> {
        self.apply(id, "mark_ready", |task, clock| task.mark_ready(clock))
            .await
    }

    /// Hands a `Ready` task to a worker.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task cannot be
    /// accepted.
    #[instrument(skip(self), fields(task_id = %id, worker = %worker))]
    pub async fn accept_task(&self, id: &TaskId, worker: EmployeeId) -> TaskLifecycleResult<Task> {
        self.apply(id, "accept", move |task, clock| task.accept(worker, clock))
            .await
    }

    /// Completes an `InProgress` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is not
    /// `InProgress`.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn mark_done(&self, id: &TaskId) -> TaskLifecycleResult<Task> {
        self.apply(id, "mark_done", |task, clock| task.mark_done(clock))
            .await
    }

    /// Closes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is already
    /// closed.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn close_task(&self, id: &TaskId) -> TaskLifecycleResult<Task> {
        self.apply(id, "close", |task, clock| task.close(clock)).await
    }

    async fn apply<F>(
        &self,
        id: &TaskId,
        operation: &'static str,
        change: F,
    ) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError> + Send,
    {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Task>(id))?;

        if let Err(err) = change(&mut task, &*self.clock) {
            warn!(task_id = %id, operation, error = %err, "task change rejected");
            return Err(err.into());
        }

        let stored = self.repository.update(id, &task).await?;
        debug!(task_id = %id, operation, state = %stored.state(), "task updated");
        Ok(stored)
    }
}
