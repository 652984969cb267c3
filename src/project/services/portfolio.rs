//! Service layer for creating projects and grouping repositories.

use crate::{
    entity::{ProjectId, RepoId},
    project::domain::{Project, ProjectDomainError, ProjectStatus},
    repo::domain::Repo,
    repository::ports::{Criteria, Repository, RepositoryError},
    service::{ErrorCode, ServiceError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    status: Option<String>,
    description: Option<String>,
    prd_url: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request for a project in `planning`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
            description: None,
            prd_url: None,
        }
    }

    /// Starts the project in the given status tag.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requirements document link.
    #[must_use]
    pub fn with_prd(mut self, prd_url: impl Into<String>) -> Self {
        self.prd_url = Some(prd_url.into());
        self
    }

    fn into_project(self, clock: &impl Clock) -> Result<Project, ProjectDomainError> {
        let status = self
            .status
            .as_deref()
            .map(ProjectStatus::try_from)
            .transpose()?
            .unwrap_or_default();
        let mut project = Project::new(self.name, status, clock)?;
        if let Some(description) = self.description {
            project.set_description(description, clock)?;
        }
        if let Some(prd_url) = self.prd_url {
            project.set_prd(prd_url, clock)?;
        }
        Ok(project)
    }
}

/// Service-level errors for portfolio operations.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError for PortfolioError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Domain(err) => err.kind().into(),
            Self::Repository(err) => err.code(),
        }
    }
}

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct PortfolioService<P, R, C>
where
    P: Repository<Project>,
    R: Repository<Repo>,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    repos: Arc<R>,
    clock: Arc<C>,
}

impl<P, R, C> PortfolioService<P, R, C>
where
    P: Repository<Project>,
    R: Repository<Repo>,
    C: Clock + Send + Sync,
{
    /// Creates a new portfolio service.
    #[must_use]
    pub const fn new(projects: Arc<P>, repos: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            projects,
            repos,
            clock,
        }
    }

    /// Validates and persists a new project.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Domain`] when the name is blank or the
    /// status tag is unknown.
    #[instrument(skip(self, request))]
    pub async fn create_project(&self, request: CreateProjectRequest) -> PortfolioResult<Project> {
        let project = request.into_project(&*self.clock)?;
        let stored = self.projects.create(&project).await?;
        info!(project_id = %stored.id(), status = %stored.status(), "project created");
        Ok(stored)
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: &ProjectId) -> PortfolioResult<Option<Project>> {
        Ok(self.projects.find_by_id(id).await?)
    }

    /// Lists projects matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Repository`] when lookup fails.
    pub async fn list_projects(&self, criteria: &Criteria) -> PortfolioResult<Vec<Project>> {
        Ok(self.projects.find_all(criteria).await?)
    }

    /// Moves a project to `status`.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Repository`] when the project does not
    /// exist.
    #[instrument(skip(self), fields(project_id = %id, status = %status))]
    pub async fn change_status(
        &self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> PortfolioResult<Project> {
        self.apply(id, "change_status", |project, clock| {
            project.set_status(status, clock);
        })
        .await
    }

    /// Adds an existing repository to a project.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Repository`] when the project or repository
    /// does not exist.
    #[instrument(skip(self), fields(project_id = %id, repo_id = %repo_id))]
    pub async fn attach_repo(&self, id: &ProjectId, repo_id: &RepoId) -> PortfolioResult<Project> {
        if !self.repos.exists(repo_id).await? {
            warn!(repo_id = %repo_id, "cannot attach unknown repo");
            return Err(RepositoryError::not_found::<Repo>(repo_id).into());
        }
        let attached = repo_id.clone();
        self.apply(id, "attach_repo", move |project, clock| {
            project.add_repo(attached, clock);
        })
        .await
    }

    /// Removes a repository from a project.
    ///
    /// Removing a repository the project does not contain is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Repository`] when the project does not
    /// exist.
    #[instrument(skip(self), fields(project_id = %id, repo_id = %repo_id))]
    pub async fn detach_repo(&self, id: &ProjectId, repo_id: &RepoId) -> PortfolioResult<Project> {
        self.apply(id, "detach_repo", |project, clock| {
            if !project.remove_repo(repo_id, clock) {
                debug!(repo_id = %repo_id, "repo was not attached");
            }
        })
        .await
    }

    async fn apply<F>(
        &self,
        id: &ProjectId,
        operation: &'static str,
        change: F,
    ) -> PortfolioResult<Project>
    where
        F: FnOnce(&mut Project, &C) + Send,
    {
        let mut project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Project>(id))?;

        change(&mut project, &*self.clock);

        let stored = self.projects.update(id, &project).await?;
        debug!(project_id = %id, operation, "project updated");
        Ok(stored)
    }
}
