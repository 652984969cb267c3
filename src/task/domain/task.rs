//! Task aggregate root.

use super::{TaskDomainError, TaskState};
use crate::entity::{EmployeeId, Entity, RecordHeader, TaskId, timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Fields are only reachable through methods that validate their input and
/// advance `updated_at`. Every fallible method leaves the task untouched
/// when it returns an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedTaskData")]
pub struct Task {
    #[serde(flatten)]
    header: RecordHeader<TaskId>,
    raw_task: String,
    title: Option<String>,
    description: Option<String>,
    requirements: Vec<String>,
    plan: Option<String>,
    acceptance_criteria: Vec<String>,
    state: TaskState,
    ideal_candidate: Option<String>,
    assignee_id: Option<EmployeeId>,
    active_employee_id: Option<EmployeeId>,
    parent_task_id: Option<TaskId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Original unstructured input.
    pub raw_task: String,
    /// Refined title, if any.
    pub title: Option<String>,
    /// Refined description, if any.
    pub description: Option<String>,
    /// Ordered requirements.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Implementation plan, if any.
    pub plan: Option<String>,
    /// Ordered acceptance criteria.
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Description of the best-suited worker, if any.
    pub ideal_candidate: Option<String>,
    /// Employee the task was assigned to, if any.
    pub assignee_id: Option<EmployeeId>,
    /// Employee currently working the task, if any.
    pub active_employee_id: Option<EmployeeId>,
    /// Parent task for decomposed work, if any.
    pub parent_task_id: Option<TaskId>,
    /// Persisted creation timestamp.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an `Open` task from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRawTask`] when the input is blank.
    pub fn new(raw_task: impl Into<String>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        Self::open(raw_task.into(), None, clock)
    }

    /// Creates an `Open` task decomposed from `parent_task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRawTask`] when the input is blank.
    pub fn new_subtask(
        raw_task: impl Into<String>,
        parent_task_id: TaskId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        Self::open(raw_task.into(), Some(parent_task_id), clock)
    }

    fn open(
        raw_task: String,
        parent_task_id: Option<TaskId>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        require_text(&raw_task, TaskDomainError::EmptyRawTask)?;
        Ok(Self {
            header: RecordHeader::new(TaskId::new(), clock),
            raw_task,
            title: None,
            description: None,
            requirements: Vec::new(),
            plan: None,
            acceptance_criteria: Vec::new(),
            state: TaskState::Open,
            ideal_candidate: None,
            assignee_id: None,
            active_employee_id: None,
            parent_task_id,
        })
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when the persisted data violates a task
    /// invariant.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        let task = Self {
            header: RecordHeader::from_persisted(data.id, data.created_at, data.updated_at)?,
            raw_task: data.raw_task,
            title: data.title,
            description: data.description,
            requirements: data.requirements,
            plan: data.plan,
            acceptance_criteria: data.acceptance_criteria,
            state: data.state,
            ideal_candidate: data.ideal_candidate,
            assignee_id: data.assignee_id,
            active_employee_id: data.active_employee_id,
            parent_task_id: data.parent_task_id,
        };
        task.validate()?;
        Ok(task)
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        self.header.id()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.header.created_at()
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.header.updated_at()
    }

    /// Returns the original unstructured input.
    #[must_use]
    pub fn raw_task(&self) -> &str {
        &self.raw_task
    }

    /// Returns the title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the ordered requirements.
    #[must_use]
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Returns the plan, if set.
    #[must_use]
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    /// Returns the ordered acceptance criteria.
    #[must_use]
    pub fn acceptance_criteria(&self) -> &[String] {
        &self.acceptance_criteria
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the ideal candidate description, if set.
    #[must_use]
    pub fn ideal_candidate(&self) -> Option<&str> {
        self.ideal_candidate.as_deref()
    }

    /// Returns the assigned employee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<&EmployeeId> {
        self.assignee_id.as_ref()
    }

    /// Returns the employee currently working the task, if any.
    #[must_use]
    pub const fn active_employee_id(&self) -> Option<&EmployeeId> {
        self.active_employee_id.as_ref()
    }

    /// Returns the parent task, if this task was decomposed from one.
    #[must_use]
    pub const fn parent_task_id(&self) -> Option<&TaskId> {
        self.parent_task_id.as_ref()
    }

    /// Returns whether the task is `Ready`.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == TaskState::Ready
    }

    /// Returns whether the task is `Done` or `Closed`.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Returns whether [`Task::accept`] would succeed.
    #[must_use]
    pub fn can_be_accepted(&self) -> bool {
        self.is_ready() && self.assignee_id.is_none()
    }

    /// Moves an `Open` task to `Ready`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// `Open`, or [`TaskDomainError::MissingReadinessField`] when the title,
    /// description, or requirements are missing.
    pub fn mark_ready(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskState::Ready)?;
        if let Some(field) = self.missing_readiness_field() {
            return Err(TaskDomainError::MissingReadinessField {
                task_id: self.id().clone(),
                field,
            });
        }
        self.state = TaskState::Ready;
        self.touch(clock);
        Ok(())
    }

    /// Hands a `Ready`, unassigned task to `worker`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CannotAccept`] when the task is not `Ready`
    /// or already has an assignee.
    pub fn accept(
        &mut self,
        worker: EmployeeId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.can_be_accepted() {
            return Err(TaskDomainError::CannotAccept {
                task_id: self.id().clone(),
                state: self.state,
            });
        }
        self.active_employee_id = Some(worker);
        self.state = TaskState::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Completes an `InProgress` task and releases its worker.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// `InProgress`.
    pub fn mark_done(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskState::Done)?;
        self.active_employee_id = None;
        self.state = TaskState::Done;
        self.touch(clock);
        Ok(())
    }

    /// Closes the task from any state and releases its worker.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyClosed`] when the task is `Closed`.
    pub fn close(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.state == TaskState::Closed {
            return Err(TaskDomainError::AlreadyClosed(self.id().clone()));
        }
        self.active_employee_id = None;
        self.state = TaskState::Closed;
        self.touch(clock);
        Ok(())
    }

    /// Sets the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn set_title(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let value = title.into();
        require_text(&value, TaskDomainError::EmptyTitle)?;
        self.title = Some(value);
        self.touch(clock);
        Ok(())
    }

    /// Sets the description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the description is
    /// blank.
    pub fn set_description(
        &mut self,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let value = description.into();
        require_text(&value, TaskDomainError::EmptyDescription)?;
        self.description = Some(value);
        self.touch(clock);
        Ok(())
    }

    /// Replaces the requirement list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRequirements`] when the list is empty
    /// or [`TaskDomainError::BlankRequirement`] when an entry is blank.
    pub fn set_requirements(
        &mut self,
        requirements: impl IntoIterator<Item = String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let values: Vec<String> = requirements.into_iter().collect();
        if values.is_empty() {
            return Err(TaskDomainError::EmptyRequirements);
        }
        if let Some(position) = first_blank(&values) {
            return Err(TaskDomainError::BlankRequirement(position));
        }
        self.requirements = values;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the acceptance criteria.
    pub fn set_acceptance_criteria(
        &mut self,
        criteria: impl IntoIterator<Item = String>,
        clock: &impl Clock,
    ) {
        self.acceptance_criteria = criteria.into_iter().collect();
        self.touch(clock);
    }

    /// Sets the implementation plan.
    pub fn set_plan(&mut self, plan: impl Into<String>, clock: &impl Clock) {
        self.plan = Some(plan.into());
        self.touch(clock);
    }

    /// Describes the worker best suited to the task.
    pub fn set_ideal_candidate(&mut self, candidate: impl Into<String>, clock: &impl Clock) {
        self.ideal_candidate = Some(candidate.into());
        self.touch(clock);
    }

    /// Records the employee the task is assigned to.
    ///
    /// Assignment does not change the lifecycle state. An assigned task can
    /// no longer be accepted.
    pub fn assign_to(&mut self, employee_id: EmployeeId, clock: &impl Clock) {
        self.assignee_id = Some(employee_id);
        self.touch(clock);
    }

    fn ensure_transition(&self, target: TaskState) -> Result<(), TaskDomainError> {
        if self.state.can_transition_to(target) {
            return Ok(());
        }
        Err(TaskDomainError::InvalidStateTransition {
            task_id: self.id().clone(),
            from: self.state,
            to: target,
        })
    }

    fn missing_readiness_field(&self) -> Option<&'static str> {
        if self.title.is_none() {
            Some("title")
        } else if self.description.is_none() {
            Some("description")
        } else if self.requirements.is_empty() {
            Some("requirement")
        } else {
            None
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.header.touch(clock);
    }
}

impl Entity for Task {
    type Id = TaskId;
    type Error = TaskDomainError;
    const KIND: &'static str = "task";

    fn header(&self) -> &RecordHeader<TaskId> {
        &self.header
    }

    fn validate(&self) -> Result<(), TaskDomainError> {
        require_text(&self.raw_task, TaskDomainError::EmptyRawTask)?;
        if let Some(title) = &self.title {
            require_text(title, TaskDomainError::EmptyTitle)?;
        }
        if let Some(description) = &self.description {
            require_text(description, TaskDomainError::EmptyDescription)?;
        }
        if let Some(position) = first_blank(&self.requirements) {
            return Err(TaskDomainError::BlankRequirement(position));
        }
        if self.parent_task_id.as_ref() == Some(self.id()) {
            return Err(TaskDomainError::SelfParent(self.id().clone()));
        }
        if self.state.requires_specification()
            && let Some(field) = self.missing_readiness_field()
        {
            return Err(TaskDomainError::MissingReadinessField {
                task_id: self.id().clone(),
                field,
            });
        }
        if self.active_employee_id.is_some() != (self.state == TaskState::InProgress) {
            return Err(TaskDomainError::InconsistentWorker {
                task_id: self.id().clone(),
                state: self.state,
            });
        }
        Ok(())
    }
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn require_text(value: &str, error: TaskDomainError) -> Result<(), TaskDomainError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}

fn first_blank(values: &[String]) -> Option<usize> {
    values.iter().position(|value| value.trim().is_empty())
}
