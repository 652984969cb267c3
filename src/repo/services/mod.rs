//! Application services for source repositories.

mod registry;

pub use registry::{RegisterRepoRequest, RepoService, RepoServiceError, RepoServiceResult};
