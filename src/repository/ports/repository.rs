//! Repository port for aggregate lookup, storage, and pagination.

use super::{Criteria, Page, PaginationOptions};
use crate::entity::Entity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence contract for a single aggregate type.
///
/// Implementations own serialisation of concurrent writers; aggregates
/// themselves are not synchronised.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Finds an aggregate by identifier.
    ///
    /// Returns `None` when the aggregate does not exist.
    async fn find_by_id(&self, id: &T::Id) -> RepositoryResult<Option<T>>;

    /// Returns every aggregate matching `criteria`, in storage order.
    async fn find_all(&self, criteria: &Criteria) -> RepositoryResult<Vec<T>>;

    /// Returns the first aggregate matching `criteria`.
    async fn find_one(&self, criteria: &Criteria) -> RepositoryResult<Option<T>>;

    /// Stores a new aggregate and returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] when the identifier already
    /// exists.
    async fn create(&self, entity: &T) -> RepositoryResult<T>;

    /// Replaces the stored aggregate with `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when `id` is unknown or
    /// [`RepositoryError::IdMismatch`] when `entity` carries another
    /// identifier.
    async fn update(&self, id: &T::Id, entity: &T) -> RepositoryResult<T>;

    /// Removes an aggregate, returning whether it existed.
    async fn delete(&self, id: &T::Id) -> RepositoryResult<bool>;

    /// Counts aggregates matching `criteria`.
    async fn count(&self, criteria: &Criteria) -> RepositoryResult<usize>;

    /// Returns whether an aggregate with `id` exists.
    async fn exists(&self, id: &T::Id) -> RepositoryResult<bool>;
}

/// Repository extension with paged queries.
#[async_trait]
pub trait PaginatedRepository<T: Entity>: Repository<T> {
    /// Returns one page of aggregates matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidPagination`] when the page or limit
    /// is out of range.
    async fn find_with_pagination(
        &self,
        criteria: &Criteria,
        options: &PaginationOptions,
    ) -> RepositoryResult<Page<T>>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// No aggregate exists with the identifier.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Aggregate kind.
        kind: &'static str,
        /// Requested identifier.
        id: String,
    },

    /// An aggregate with the identifier already exists.
    #[error("duplicate {kind} identifier: {id}")]
    Duplicate {
        /// Aggregate kind.
        kind: &'static str,
        /// Conflicting identifier.
        id: String,
    },

    /// The identifier passed to `update` differs from the aggregate's own.
    #[error("{kind} identifier mismatch: expected {expected}, got {actual}")]
    IdMismatch {
        /// Aggregate kind.
        kind: &'static str,
        /// Identifier passed to the repository.
        expected: String,
        /// Identifier carried by the aggregate.
        actual: String,
    },

    /// Page or limit values are out of range.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// The aggregate could not be converted to its boundary representation.
    #[error("serialisation error: {0}")]
    Serialization(Arc<serde_json::Error>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Builds a not-found error for an aggregate identifier.
    #[must_use]
    pub fn not_found<T: Entity>(id: &T::Id) -> Self {
        Self::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    /// Builds a duplicate-identifier error.
    #[must_use]
    pub fn duplicate<T: Entity>(id: &T::Id) -> Self {
        Self::Duplicate {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    /// Wraps a serialisation error.
    #[must_use]
    pub fn serialization(err: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(err))
    }

    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
