//! Port contracts for aggregate persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the services of
//! every bounded context.

pub mod criteria;
pub mod pagination;
pub mod repository;

pub use criteria::Criteria;
pub use pagination::{Page, PaginationOptions, SortOrder};
pub use repository::{PaginatedRepository, Repository, RepositoryError, RepositoryResult};
