//! Error types for repository record validation.

use crate::entity::{DomainErrorKind, InvalidEntityId, TimestampOrderError};
use thiserror::Error;

/// Errors returned while constructing or mutating repo records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepoDomainError {
    /// A required text field is empty after trimming.
    #[error("repo {0} must not be empty")]
    EmptyField(&'static str),

    /// The remote does not start with a URL scheme.
    #[error("invalid repo remote URL: {0}")]
    InvalidRemote(String),

    /// A persisted identifier was blank.
    #[error(transparent)]
    InvalidId(#[from] InvalidEntityId),

    /// Persisted timestamps were out of order.
    #[error(transparent)]
    InvalidTimestamps(#[from] TimestampOrderError),
}

impl RepoDomainError {
    /// Classifies the error for service responses.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        DomainErrorKind::Validation
    }
}
