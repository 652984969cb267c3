//! Shared entity plumbing for every Atelier aggregate.
//!
//! Aggregates embed a [`RecordHeader`] that owns identity and lifecycle
//! timestamps, and implement [`Entity`] so generic repositories can index,
//! filter, and serialise them without knowing their concrete shape.

mod error;
mod header;
mod ids;
pub mod timestamp;

pub use error::{DomainErrorKind, InvalidEntityId, TimestampOrderError};
pub use header::RecordHeader;
pub use ids::{DecisionId, EmployeeId, ProjectId, RepoId, SessionId, TaskId};

use serde::Serialize;
use std::{fmt, hash::Hash};

/// Behaviour shared by every persisted aggregate.
///
/// Implementors keep their state private and expose it only through
/// validating methods; this trait is the read-side contract that persistence
/// adapters rely on.
pub trait Entity: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Identifier type of the aggregate.
    type Id: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Validation error raised by [`Entity::validate`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Human-readable aggregate name used in logs and errors.
    const KIND: &'static str;

    /// Returns the identity and timestamp header.
    fn header(&self) -> &RecordHeader<Self::Id>;

    /// Re-checks every invariant of the aggregate.
    ///
    /// # Errors
    ///
    /// Returns the aggregate's domain error naming the first violated
    /// invariant.
    fn validate(&self) -> Result<(), Self::Error>;

    /// Serialises the aggregate into its boundary representation.
    ///
    /// Keys are camelCase, timestamps ISO-8601 strings, and enumerations
    /// their lowercase tags.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialisation fails.
    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
