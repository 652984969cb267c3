//! Error types for project validation.

use crate::entity::{DomainErrorKind, InvalidEntityId, TimestampOrderError};
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// An optional text field was supplied but blank.
    #[error("project {0} must not be blank when present")]
    BlankField(&'static str),

    /// The status is not one of the known tags.
    #[error("invalid project status: {0}")]
    InvalidStatus(String),

    /// A persisted identifier was blank.
    #[error(transparent)]
    InvalidId(#[from] InvalidEntityId),

    /// Persisted timestamps were out of order.
    #[error(transparent)]
    InvalidTimestamps(#[from] TimestampOrderError),
}

impl ProjectDomainError {
    /// Classifies the error for service responses.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        DomainErrorKind::Validation
    }
}
