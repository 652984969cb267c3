//! Error types for employee validation and transitions.

use super::SeniorityLevel;
use crate::entity::{DomainErrorKind, EmployeeId, InvalidEntityId, TaskId, TimestampOrderError};
use thiserror::Error;

/// Errors returned while constructing or mutating employees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmployeeDomainError {
    /// The name is empty after trimming.
    #[error("employee name must not be empty")]
    EmptyName,

    /// An optional text field was supplied but blank.
    #[error("employee {0} must not be blank when present")]
    BlankField(&'static str),

    /// A domain of experience or expertise is blank.
    #[error("employee domain must not be empty")]
    EmptyDomain,

    /// The agent type is not one of the known tags.
    #[error("invalid agent type: {0}")]
    InvalidAgentType(String),

    /// The seniority level is not one of the known tags.
    #[error("invalid seniority level: {0}")]
    InvalidSeniority(String),

    /// The employee is already working another task.
    #[error("employee {employee_id} already has active task {active_task_id}")]
    ActiveTaskConflict {
        /// Busy employee.
        employee_id: EmployeeId,
        /// Task currently held.
        active_task_id: TaskId,
    },

    /// The employee has nothing to complete.
    #[error("employee {0} has no active task to complete")]
    NoActiveTask(EmployeeId),

    /// Promotion must strictly raise seniority.
    #[error("cannot promote to same or lower level ({from} to {to})")]
    InvalidPromotion {
        /// Current level.
        from: SeniorityLevel,
        /// Requested level.
        to: SeniorityLevel,
    },

    /// A persisted identifier was blank.
    #[error(transparent)]
    InvalidId(#[from] InvalidEntityId),

    /// Persisted timestamps were out of order.
    #[error(transparent)]
    InvalidTimestamps(#[from] TimestampOrderError),
}

impl EmployeeDomainError {
    /// Classifies the error for service responses.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        match self {
            Self::ActiveTaskConflict { .. } | Self::NoActiveTask(_) => {
                DomainErrorKind::StateTransition
            }
            _ => DomainErrorKind::Validation,
        }
    }
}
