//! Service layer for hiring, developing, and staffing employees.

use crate::{
    employee::domain::{AgentType, Employee, EmployeeDomainError, SeniorityLevel},
    entity::{EmployeeId, TaskId},
    repository::ports::{Criteria, Repository, RepositoryError},
    service::{ErrorCode, ServiceError},
    task::domain::{Task, TaskDomainError},
};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for hiring an employee from boundary input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HireEmployeeRequest {
    name: String,
    agent_type: String,
    seniority: Option<String>,
    personality: Option<String>,
    background: Option<String>,
}

impl HireEmployeeRequest {
    /// Creates a request for a junior employee.
    #[must_use]
    pub fn new(name: impl Into<String>, agent_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agent_type: agent_type.into(),
            seniority: None,
            personality: None,
            background: None,
        }
    }

    /// Hires at the given seniority tag instead of `junior`.
    #[must_use]
    pub fn with_seniority(mut self, seniority: impl Into<String>) -> Self {
        self.seniority = Some(seniority.into());
        self
    }

    /// Sets the personality prompt.
    #[must_use]
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = Some(personality.into());
        self
    }

    /// Sets the background prompt.
    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    fn into_employee(self, clock: &impl Clock) -> Result<Employee, EmployeeDomainError> {
        let agent_type = AgentType::try_from(self.agent_type.as_str())?;
        let seniority = self
            .seniority
            .as_deref()
            .map(SeniorityLevel::try_from)
            .transpose()?
            .unwrap_or_default();
        let mut employee = Employee::new(self.name, agent_type, seniority, clock)?;
        if let Some(personality) = self.personality {
            employee.set_personality(personality, clock)?;
        }
        if let Some(background) = self.background {
            employee.set_background(background, clock)?;
        }
        Ok(employee)
    }
}

/// An employee and the task they hold, as persisted together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Employee after the change.
    pub employee: Employee,
    /// Task after the change.
    pub task: Task,
}

/// Service-level errors for staffing operations.
#[derive(Debug, Error)]
pub enum StaffingError {
    /// Employee validation or transition failed.
    #[error(transparent)]
    Employee(#[from] EmployeeDomainError),
    /// Task transition failed.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// The employee's active task is being worked by someone else.
    #[error("task {task_id} is not being worked by employee {employee_id}")]
    WorkerMismatch {
        /// Employee finishing the task.
        employee_id: EmployeeId,
        /// Task the employee holds.
        task_id: TaskId,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError for StaffingError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Employee(err) => err.kind().into(),
            Self::Task(err) => err.kind().into(),
            Self::WorkerMismatch { .. } => ErrorCode::Conflict,
            Self::Repository(err) => err.code(),
        }
    }
}

/// Result type for staffing operations.
pub type StaffingResult<T> = Result<T, StaffingError>;

/// Employee orchestration service.
///
/// Starting and finishing work changes an employee and a task together:
/// both are validated before either is written.
#[derive(Clone)]
pub struct StaffingService<E, T, C>
where
    E: Repository<Employee>,
    T: Repository<Task>,
    C: Clock + Send + Sync,
{
    employees: Arc<E>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<E, T, C> StaffingService<E, T, C>
where
    E: Repository<Employee>,
    T: Repository<Task>,
    C: Clock + Send + Sync,
{
    /// Creates a new staffing service.
    #[must_use]
    pub const fn new(employees: Arc<E>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            employees,
            tasks,
            clock,
        }
    }

    /// Validates and persists a new employee.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingError::Employee`] when the name is blank or a tag
    /// is unknown.
    #[instrument(skip(self, request))]
    pub async fn hire(&self, request: HireEmployeeRequest) -> StaffingResult<Employee> {
        let employee = request.into_employee(&*self.clock)?;
        let stored = self.employees.create(&employee).await?;
        info!(
            employee_id = %stored.id(),
            agent_type = %stored.agent_type(),
            seniority = %stored.seniority(),
            "employee hired"
        );
        Ok(stored)
    }

    /// Finds an employee by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: &EmployeeId) -> StaffingResult<Option<Employee>> {
        Ok(self.employees.find_by_id(id).await?)
    }

    /// Lists employees without an active task.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingError::Repository`] when lookup fails.
    pub async fn list_available(&self) -> StaffingResult<Vec<Employee>> {
        let criteria = Criteria::all().with_field("activeTaskId", Value::Null);
        Ok(self.employees.find_all(&criteria).await?)
    }

    /// Promotes an employee.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingError::Employee`] unless `level` ranks above the
    /// current level.
    #[instrument(skip(self), fields(employee_id = %id, level = %level))]
    pub async fn promote(
        &self,
        id: &EmployeeId,
        level: SeniorityLevel,
    ) -> StaffingResult<Employee> {
        self.apply(id, "promote", move |employee, clock| {
            employee.promote(level, clock)
        })
        .await
    }

    /// Records a domain of experience.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingError::Employee`] when the domain is blank.
    #[instrument(skip(self), fields(employee_id = %id))]
    pub async fn add_experience(
        &self,
        id: &EmployeeId,
        domain: String,
    ) -> StaffingResult<Employee> {
        self.apply(id, "add_experience", move |employee, clock| {
            employee.add_experience(domain, clock)
        })
        .await
    }

    /// Records a domain of expertise.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingError::Employee`] when the domain is blank.
    #[instrument(skip(self), fields(employee_id = %id))]
    pub async fn add_expertise(
        &self,
        id: &EmployeeId,
        domain: String,
    ) -> StaffingResult<Employee> {
        self.apply(id, "add_expertise", move |employee, clock| {
            employee.add_expertise(domain, clock)
        })
        .await
    }

    /// Hands a `Ready` task to an idle employee.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingError::Employee`] when the employee already holds
    /// a task, [`StaffingError::Task`] when the task cannot be accepted, or
    /// [`StaffingError::Repository`] when either record is missing.
    #[instrument(skip(self), fields(employee_id = %employee_id, task_id = %task_id))]
    pub async fn start_task(
        &self,
        employee_id: &EmployeeId,
        task_id: &TaskId,
    ) -> StaffingResult<Assignment> {
        let mut employee = self.load_employee(employee_id).await?;
        let original_task = self.load_task(task_id).await?;
        let mut task = original_task.clone();
        let clock = &*self.clock;

        employee.assign_task(task_id.clone(), clock)?;
        task.accept(employee_id.clone(), clock)?;

        let assignment = self.persist(&employee, &task, &original_task).await?;
        info!(employee_id = %employee_id, task_id = %task_id, "task started");
        Ok(assignment)
    }

    /// Completes an employee's active task and frees the employee.
    ///
    /// # Errors
    ///
    /// Returns [`StaffingError::Employee`] when the employee holds no task,
    /// [`StaffingError::WorkerMismatch`] when the task is worked by someone
    /// else, or [`StaffingError::Task`] when the task is not in progress.
    #[instrument(skip(self), fields(employee_id = %employee_id))]
    pub async fn finish_task(&self, employee_id: &EmployeeId) -> StaffingResult<Assignment> {
        let mut employee = self.load_employee(employee_id).await?;
        let clock = &*self.clock;
        let task_id = employee.complete_task(clock)?;
        let original_task = self.load_task(&task_id).await?;
        if original_task.active_employee_id() != Some(employee_id) {
            return Err(StaffingError::WorkerMismatch {
                employee_id: employee_id.clone(),
                task_id,
            });
        }
        let mut task = original_task.clone();
        task.mark_done(clock)?;

        let assignment = self.persist(&employee, &task, &original_task).await?;
        info!(employee_id = %employee_id, task_id = %task_id, "task finished");
        Ok(assignment)
    }

    async fn load_employee(&self, id: &EmployeeId) -> StaffingResult<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Employee>(id).into())
    }

    async fn load_task(&self, id: &TaskId) -> StaffingResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Task>(id).into())
    }

    async fn persist(
        &self,
        employee: &Employee,
        task: &Task,
        original_task: &Task,
    ) -> StaffingResult<Assignment> {
        let stored_task = self.tasks.update(task.id(), task).await?;
        match self.employees.update(employee.id(), employee).await {
            Ok(stored_employee) => Ok(Assignment {
                employee: stored_employee,
                task: stored_task,
            }),
            Err(err) => {
                if let Err(rollback) = self.tasks.update(original_task.id(), original_task).await {
                    warn!(
                        task_id = %original_task.id(),
                        error = %rollback,
                        "failed to restore task after employee update failed"
                    );
                }
                Err(err.into())
            }
        }
    }

    async fn apply<F>(
        &self,
        id: &EmployeeId,
        operation: &'static str,
        change: F,
    ) -> StaffingResult<Employee>
    where
        F: FnOnce(&mut Employee, &C) -> Result<(), EmployeeDomainError> + Send,
    {
        let mut employee = self.load_employee(id).await?;

        if let Err(err) = change(&mut employee, &*self.clock) {
            warn!(employee_id = %id, operation, error = %err, "employee change rejected");
            return Err(err.into());
        }

        let stored = self.employees.update(id, &employee).await?;
        debug!(employee_id = %id, operation, "employee updated");
        Ok(stored)
    }
}
