//! Domain model for projects.

mod error;
mod project;
mod status;

pub use error::ProjectDomainError;
pub use project::{PersistedProjectData, Project};
pub use status::ProjectStatus;
