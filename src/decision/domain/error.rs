//! Error types for decision validation and reversal.

use crate::entity::{DecisionId, DomainErrorKind, InvalidEntityId, TimestampOrderError};
use thiserror::Error;

/// Errors returned while constructing or mutating decisions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecisionDomainError {
    /// A required text field is empty after trimming.
    #[error("decision {0} must not be empty")]
    EmptyField(&'static str),

    /// The impact level is not one of the known tags.
    #[error("invalid decision impact: {0}")]
    InvalidImpact(String),

    /// The category is not one of the known tags.
    #[error("invalid decision category: {0}")]
    InvalidCategory(String),

    /// The decision is irreversible or already reversed.
    #[error("decision {0} cannot be reversed")]
    CannotReverse(DecisionId),

    /// Reversal timestamp and actor must be recorded together, and only on
    /// reversible decisions.
    #[error("decision {0} has an inconsistent reversal record")]
    InconsistentReversal(DecisionId),

    /// A persisted identifier was blank.
    #[error(transparent)]
    InvalidId(#[from] InvalidEntityId),

    /// Persisted timestamps were out of order.
    #[error(transparent)]
    InvalidTimestamps(#[from] TimestampOrderError),
}

impl DecisionDomainError {
    /// Classifies the error for service responses.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        match self {
            Self::CannotReverse(_) => DomainErrorKind::StateTransition,
            _ => DomainErrorKind::Validation,
        }
    }
}
