//! Domain model for source repositories.

mod error;
mod repo;

pub use error::RepoDomainError;
pub use repo::{NewRepo, PersistedRepoData, Repo, RepoRole};
