//! Service layer for registering repositories and appointing their leads.

use crate::{
    employee::domain::Employee,
    entity::{EmployeeId, RepoId},
    repo::domain::{NewRepo, Repo, RepoDomainError, RepoRole},
    repository::ports::{Criteria, Repository, RepositoryError},
    service::{ErrorCode, ServiceError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Request payload for registering a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRepoRequest {
    name: String,
    remote: String,
    local_path: String,
    default_branch: String,
}

impl RegisterRepoRequest {
    /// Creates a request tracking the `main` branch.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        remote: impl Into<String>,
        local_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            remote: remote.into(),
            local_path: local_path.into(),
            default_branch: "main".to_owned(),
        }
    }

    /// Tracks `branch` instead of `main`.
    #[must_use]
    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }
}

impl From<RegisterRepoRequest> for NewRepo {
    fn from(request: RegisterRepoRequest) -> Self {
        Self {
            name: request.name,
            remote: request.remote,
            local_path: request.local_path,
            default_branch: request.default_branch,
        }
    }
}

/// Service-level errors for repo operations.
#[derive(Debug, Error)]
pub enum RepoServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RepoDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError for RepoServiceError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Domain(err) => err.kind().into(),
            Self::Repository(err) => err.code(),
        }
    }
}

/// Result type for repo operations.
pub type RepoServiceResult<T> = Result<T, RepoServiceError>;

/// Repo orchestration service.
#[derive(Clone)]
pub struct RepoService<R, E, C>
where
    R: Repository<Repo>,
    E: Repository<Employee>,
    C: Clock + Send + Sync,
{
    repos: Arc<R>,
    employees: Arc<E>,
    clock: Arc<C>,
}

impl<R, E, C> RepoService<R, E, C>
where
    R: Repository<Repo>,
    E: Repository<Employee>,
    C: Clock + Send + Sync,
{
    /// Creates a new repo service.
    #[must_use]
    pub const fn new(repos: Arc<R>, employees: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            repos,
            employees,
            clock,
        }
    }

    /// Validates and persists a new repository.
    ///
    /// # Errors
    ///
    /// Returns [`RepoServiceError::Domain`] when a field is blank or the
    /// remote lacks a URL scheme.
    #[instrument(skip(self, request))]
    pub async fn register_repo(&self, request: RegisterRepoRequest) -> RepoServiceResult<Repo> {
        let repo = Repo::new(request.into(), &*self.clock)?;
        let stored = self.repos.create(&repo).await?;
        info!(repo_id = %stored.id(), remote = stored.remote(), "repo registered");
        Ok(stored)
    }

    /// Finds a repository by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepoServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: &RepoId) -> RepoServiceResult<Option<Repo>> {
        Ok(self.repos.find_by_id(id).await?)
    }

    /// Lists repositories matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoServiceError::Repository`] when lookup fails.
    pub async fn list_repos(&self, criteria: &Criteria) -> RepoServiceResult<Vec<Repo>> {
        Ok(self.repos.find_all(criteria).await?)
    }

    /// Appoints an existing employee as lead architect.
    ///
    /// # Errors
    ///
    /// Returns [`RepoServiceError::Repository`] when the repo or employee
    /// does not exist.
    pub async fn appoint_lead_architect(
        &self,
        repo_id: &RepoId,
        employee_id: &EmployeeId,
    ) -> RepoServiceResult<Repo> {
        self.appoint(repo_id, RepoRole::LeadArchitect, employee_id)
            .await
    }

    /// Appoints an existing employee as project manager.
    ///
    /// # Errors
    ///
    /// Returns [`RepoServiceError::Repository`] when the repo or employee
    /// does not exist.
    pub async fn appoint_project_manager(
        &self,
        repo_id: &RepoId,
        employee_id: &EmployeeId,
    ) -> RepoServiceResult<Repo> {
        self.appoint(repo_id, RepoRole::ProjectManager, employee_id)
            .await
    }

    /// Appoints an existing employee as QA lead.
    ///
    /// # Errors
    ///
    /// Returns [`RepoServiceError::Repository`] when the repo or employee
    /// does not exist.
    pub async fn appoint_qa_lead(
        &self,
        repo_id: &RepoId,
        employee_id: &EmployeeId,
    ) -> RepoServiceResult<Repo> {
        self.appoint(repo_id, RepoRole::QaLead, employee_id).await
    }

    #[instrument(skip(self), fields(repo_id = %repo_id, role = %role, employee_id = %employee_id))]
    async fn appoint(
        &self,
        repo_id: &RepoId,
        role: RepoRole,
        employee_id: &EmployeeId,
    ) -> RepoServiceResult<Repo> {
        let mut repo = self
            .repos
            .find_by_id(repo_id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Repo>(repo_id))?;
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Employee>(employee_id))?;

        repo.appoint(role, &employee, &*self.clock);

        let stored = self.repos.update(repo_id, &repo).await?;
        info!("repo lead appointed");
        Ok(stored)
    }
}
