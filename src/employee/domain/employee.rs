//! Employee aggregate root.

use super::{AgentType, EmployeeDomainError, SeniorityLevel};
use crate::entity::{EmployeeId, Entity, RecordHeader, TaskId, timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An agent that accepts and completes tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedEmployeeData")]
pub struct Employee {
    #[serde(flatten)]
    header: RecordHeader<EmployeeId>,
    name: String,
    agent_type: AgentType,
    #[serde(rename = "salary")]
    seniority: SeniorityLevel,
    personality: Option<String>,
    background: Option<String>,
    active_memory_shard_id: Option<String>,
    active_task_id: Option<TaskId>,
    domains_of_experience: BTreeSet<String>,
    domains_of_expertise: BTreeSet<String>,
}

/// Parameter object for reconstructing a persisted employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEmployeeData {
    /// Persisted employee identifier.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Backing runtime.
    pub agent_type: AgentType,
    /// Seniority level, stored under the `salary` key.
    #[serde(rename = "salary")]
    pub seniority: SeniorityLevel,
    /// Personality prompt, if any.
    #[serde(default)]
    pub personality: Option<String>,
    /// Background prompt, if any.
    #[serde(default)]
    pub background: Option<String>,
    /// Memory shard currently loaded, if any.
    #[serde(default)]
    pub active_memory_shard_id: Option<String>,
    /// Task currently held, if any.
    #[serde(default)]
    pub active_task_id: Option<TaskId>,
    /// Domains the employee has worked in.
    #[serde(default)]
    pub domains_of_experience: BTreeSet<String>,
    /// Domains the employee is an authority on.
    #[serde(default)]
    pub domains_of_expertise: BTreeSet<String>,
    /// Persisted creation timestamp.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Creates an idle employee with no recorded domains.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::EmptyName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        agent_type: AgentType,
        seniority: SeniorityLevel,
        clock: &impl Clock,
    ) -> Result<Self, EmployeeDomainError> {
        let value = name.into();
        if value.trim().is_empty() {
            return Err(EmployeeDomainError::EmptyName);
        }
        Ok(Self {
            header: RecordHeader::new(EmployeeId::new(), clock),
            name: value,
            agent_type,
            seniority,
            personality: None,
            background: None,
            active_memory_shard_id: None,
            active_task_id: None,
            domains_of_experience: BTreeSet::new(),
            domains_of_expertise: BTreeSet::new(),
        })
    }

    /// Reconstructs an employee from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns an [`EmployeeDomainError`] when the data violates an
    /// employee invariant.
    pub fn from_persisted(data: PersistedEmployeeData) -> Result<Self, EmployeeDomainError> {
        let employee = Self {
            header: RecordHeader::from_persisted(data.id, data.created_at, data.updated_at)?,
            name: data.name,
            agent_type: data.agent_type,
            seniority: data.seniority,
            personality: data.personality,
            background: data.background,
            active_memory_shard_id: data.active_memory_shard_id,
            active_task_id: data.active_task_id,
            domains_of_experience: data.domains_of_experience,
            domains_of_expertise: data.domains_of_expertise,
        };
        employee.validate()?;
        Ok(employee)
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn id(&self) -> &EmployeeId {
        self.header.id()
    }

    /// Returns when the employee was hired.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.header.created_at()
    }

    /// Returns when the employee last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.header.updated_at()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backing runtime.
    #[must_use]
    pub const fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    /// Returns the seniority level.
    #[must_use]
    pub const fn seniority(&self) -> SeniorityLevel {
        self.seniority
    }

    /// Returns the personality prompt.
    #[must_use]
    pub fn personality(&self) -> Option<&str> {
        self.personality.as_deref()
    }

    /// Returns the background prompt.
    #[must_use]
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Returns the loaded memory shard.
    #[must_use]
    pub fn active_memory_shard_id(&self) -> Option<&str> {
        self.active_memory_shard_id.as_deref()
    }

    /// Returns the task currently held.
    #[must_use]
    pub const fn active_task_id(&self) -> Option<&TaskId> {
        self.active_task_id.as_ref()
    }

    /// Returns the domains of experience in sorted order.
    #[must_use]
    pub const fn domains_of_experience(&self) -> &BTreeSet<String> {
        &self.domains_of_experience
    }

    /// Returns the domains of expertise in sorted order.
    #[must_use]
    pub const fn domains_of_expertise(&self) -> &BTreeSet<String> {
        &self.domains_of_expertise
    }

    /// Returns whether the employee is working a task.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active_task_id.is_some()
    }

    /// Takes on `task_id` as the active task.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::ActiveTaskConflict`] when a task is
    /// already held.
    pub fn assign_task(
        &mut self,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Result<(), EmployeeDomainError> {
        if let Some(active) = &self.active_task_id {
            return Err(EmployeeDomainError::ActiveTaskConflict {
                employee_id: self.id().clone(),
                active_task_id: active.clone(),
            });
        }
        self.active_task_id = Some(task_id);
        self.touch(clock);
        Ok(())
    }

    /// Releases the active task.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::NoActiveTask`] when no task is held.
    pub fn complete_task(&mut self, clock: &impl Clock) -> Result<TaskId, EmployeeDomainError> {
        let Some(task_id) = self.active_task_id.take() else {
            return Err(EmployeeDomainError::NoActiveTask(self.id().clone()));
        };
        self.touch(clock);
        Ok(task_id)
    }

    /// Raises seniority to `level`.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::InvalidPromotion`] unless `level`
    /// ranks strictly above the current level.
    pub fn promote(
        &mut self,
        level: SeniorityLevel,
        clock: &impl Clock,
    ) -> Result<(), EmployeeDomainError> {
        if level.rank() <= self.seniority.rank() {
            return Err(EmployeeDomainError::InvalidPromotion {
                from: self.seniority,
                to: level,
            });
        }
        self.seniority = level;
        self.touch(clock);
        Ok(())
    }

    /// Records a domain the employee has worked in.
    ///
    /// Adding a known domain leaves the set unchanged but still advances
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::EmptyDomain`] when the domain is blank.
    pub fn add_experience(
        &mut self,
        domain: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), EmployeeDomainError> {
        let value = require_domain(domain.into())?;
        self.domains_of_experience.insert(value);
        self.touch(clock);
        Ok(())
    }

    /// Records a domain the employee is an authority on.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::EmptyDomain`] when the domain is blank.
    pub fn add_expertise(
        &mut self,
        domain: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), EmployeeDomainError> {
        let value = require_domain(domain.into())?;
        self.domains_of_expertise.insert(value);
        self.touch(clock);
        Ok(())
    }

    /// Sets the personality prompt.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::BlankField`] when the text is blank.
    pub fn set_personality(
        &mut self,
        personality: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), EmployeeDomainError> {
        self.personality = Some(require_optional(personality.into(), "personality")?);
        self.touch(clock);
        Ok(())
    }

    /// Sets the background prompt.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::BlankField`] when the text is blank.
    pub fn set_background(
        &mut self,
        background: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), EmployeeDomainError> {
        self.background = Some(require_optional(background.into(), "background")?);
        self.touch(clock);
        Ok(())
    }

    /// Points the employee at a memory shard, or detaches it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDomainError::BlankField`] when the shard id is blank.
    pub fn load_memory_shard(
        &mut self,
        shard_id: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), EmployeeDomainError> {
        self.active_memory_shard_id = shard_id
            .map(|id| require_optional(id, "memory shard id"))
            .transpose()?;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.header.touch(clock);
    }
}

impl Entity for Employee {
    type Id = EmployeeId;
    type Error = EmployeeDomainError;
    const KIND: &'static str = "employee";

    fn header(&self) -> &RecordHeader<EmployeeId> {
        &self.header
    }

    fn validate(&self) -> Result<(), EmployeeDomainError> {
        if self.name.trim().is_empty() {
            return Err(EmployeeDomainError::EmptyName);
        }
        for (value, field) in [
            (&self.personality, "personality"),
            (&self.background, "background"),
            (&self.active_memory_shard_id, "memory shard id"),
        ] {
            if value.as_deref().is_some_and(|text| text.trim().is_empty()) {
                return Err(EmployeeDomainError::BlankField(field));
            }
        }
        let mut domains = self
            .domains_of_experience
            .iter()
            .chain(&self.domains_of_expertise);
        if domains.any(|domain| domain.trim().is_empty()) {
            return Err(EmployeeDomainError::EmptyDomain);
        }
        Ok(())
    }
}

impl TryFrom<PersistedEmployeeData> for Employee {
    type Error = EmployeeDomainError;

    fn try_from(data: PersistedEmployeeData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn require_domain(domain: String) -> Result<String, EmployeeDomainError> {
    if domain.trim().is_empty() {
        return Err(EmployeeDomainError::EmptyDomain);
    }
    Ok(domain)
}

fn require_optional(value: String, field: &'static str) -> Result<String, EmployeeDomainError> {
    if value.trim().is_empty() {
        return Err(EmployeeDomainError::BlankField(field));
    }
    Ok(value)
}
