//! Error types shared by all entity kinds.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error returned when an identifier string is blank.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} must not be blank")]
pub struct InvalidEntityId {
    kind: &'static str,
}

impl InvalidEntityId {
    /// Creates an error for the named identifier type.
    #[must_use]
    pub const fn new(kind: &'static str) -> Self {
        Self { kind }
    }

    /// Returns the identifier type that failed to parse.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }
}

/// Error returned when a persisted header was modified before it was created.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("updated_at {updated_at} precedes created_at {created_at}")]
pub struct TimestampOrderError {
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Broad classification of domain failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// A required value was missing or malformed.
    Validation,
    /// The aggregate's current state does not permit the operation.
    StateTransition,
}
