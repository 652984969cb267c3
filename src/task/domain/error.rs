//! Error types for task domain validation and transitions.

use super::TaskState;
use crate::entity::{DomainErrorKind, InvalidEntityId, TaskId, TimestampOrderError};
use thiserror::Error;

/// Errors returned while constructing or mutating tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The raw task text is empty after trimming.
    #[error("raw task must not be empty")]
    EmptyRawTask,

    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The requirement list is empty.
    #[error("task requirements must not be empty")]
    EmptyRequirements,

    /// A requirement entry is empty after trimming.
    #[error("task requirement at position {0} must not be blank")]
    BlankRequirement(usize),

    /// A task named itself as its parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(TaskId),

    /// The task lacks a field required to leave the `Open` state.
    #[error("task {task_id} cannot be marked ready without a {field}")]
    MissingReadinessField {
        /// Task being transitioned.
        task_id: TaskId,
        /// First missing field.
        field: &'static str,
    },

    /// The lifecycle does not permit the requested transition.
    #[error("invalid task state transition for {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current state.
        from: TaskState,
        /// Requested state.
        to: TaskState,
    },

    /// The task is not `Ready`, or is already assigned.
    #[error("task {task_id} cannot be accepted in current state ({state})")]
    CannotAccept {
        /// Task being accepted.
        task_id: TaskId,
        /// Current state.
        state: TaskState,
    },

    /// The task has already been closed.
    #[error("task {0} is already closed")]
    AlreadyClosed(TaskId),

    /// Persisted worker assignment contradicts the persisted state.
    #[error("task {task_id} in state {state} has an inconsistent active worker")]
    InconsistentWorker {
        /// Offending task.
        task_id: TaskId,
        /// Persisted state.
        state: TaskState,
    },

    /// An identifier was blank.
    #[error(transparent)]
    InvalidId(#[from] InvalidEntityId),

    /// Persisted timestamps are out of order.
    #[error(transparent)]
    InvalidTimestamps(#[from] TimestampOrderError),
}

impl TaskDomainError {
    /// Classifies the error as a validation or state-transition failure.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        match self {
            Self::InvalidStateTransition { .. }
            | Self::CannotAccept { .. }
            | Self::AlreadyClosed(_) => DomainErrorKind::StateTransition,
            _ => DomainErrorKind::Validation,
        }
    }
}

/// Error returned while parsing task states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
