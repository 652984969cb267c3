//! Project aggregate root.

use super::{ProjectDomainError, ProjectStatus};
use crate::entity::{EmployeeId, Entity, ProjectId, RecordHeader, RepoId, timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A project grouping one or more repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedProjectData")]
pub struct Project {
    #[serde(flatten)]
    header: RecordHeader<ProjectId>,
    name: String,
    description: Option<String>,
    prd_url: Option<String>,
    project_director_id: Option<EmployeeId>,
    engineering_director_id: Option<EmployeeId>,
    qa_director_id: Option<EmployeeId>,
    status: ProjectStatus,
    repo_ids: BTreeSet<RepoId>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the product requirements document, if any.
    #[serde(default)]
    pub prd_url: Option<String>,
    /// Project director, if appointed.
    #[serde(default)]
    pub project_director_id: Option<EmployeeId>,
    /// Engineering director, if appointed.
    #[serde(default)]
    pub engineering_director_id: Option<EmployeeId>,
    /// QA director, if appointed.
    #[serde(default)]
    pub qa_director_id: Option<EmployeeId>,
    /// Current status.
    pub status: ProjectStatus,
    /// Repositories in the project.
    #[serde(default)]
    pub repo_ids: BTreeSet<RepoId>,
    /// Persisted creation timestamp.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project with no repositories or directors.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        status: ProjectStatus,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let value = name.into();
        if value.trim().is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }
        Ok(Self {
            header: RecordHeader::new(ProjectId::new(), clock),
            name: value,
            description: None,
            prd_url: None,
            project_director_id: None,
            engineering_director_id: None,
            qa_director_id: None,
            status,
            repo_ids: BTreeSet::new(),
        })
    }

    /// Reconstructs a project from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns a [`ProjectDomainError`] when the data violates a project
    /// invariant.
    pub fn from_persisted(data: PersistedProjectData) -> Result<Self, ProjectDomainError> {
        let project = Self {
            header: RecordHeader::from_persisted(data.id, data.created_at, data.updated_at)?,
            name: data.name,
            description: data.description,
            prd_url: data.prd_url,
            project_director_id: data.project_director_id,
            engineering_director_id: data.engineering_director_id,
            qa_director_id: data.qa_director_id,
            status: data.status,
            repo_ids: data.repo_ids,
        };
        project.validate()?;
        Ok(project)
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        self.header.id()
    }

    /// Returns when the project was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.header.created_at()
    }

    /// Returns when the project last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.header.updated_at()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the requirements document link.
    #[must_use]
    pub fn prd_url(&self) -> Option<&str> {
        self.prd_url.as_deref()
    }

    /// Returns the project director.
    #[must_use]
    pub const fn project_director_id(&self) -> Option<&EmployeeId> {
        self.project_director_id.as_ref()
    }

    /// Returns the engineering director.
    #[must_use]
    pub const fn engineering_director_id(&self) -> Option<&EmployeeId> {
        self.engineering_director_id.as_ref()
    }

    /// Returns the QA director.
    #[must_use]
    pub const fn qa_director_id(&self) -> Option<&EmployeeId> {
        self.qa_director_id.as_ref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the repositories in sorted order.
    #[must_use]
    pub const fn repo_ids(&self) -> &BTreeSet<RepoId> {
        &self.repo_ids
    }

    /// Returns whether the project is `Active`.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, ProjectStatus::Active)
    }

    /// Moves the project to `status`.
    pub fn set_status(&mut self, status: ProjectStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Sets the description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::BlankField`] when the text is blank.
    pub fn set_description(
        &mut self,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.description = Some(require_text(description.into(), "description")?);
        self.touch(clock);
        Ok(())
    }

    /// Sets the requirements document link.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::BlankField`] when the link is blank.
    pub fn set_prd(
        &mut self,
        prd_url: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.prd_url = Some(require_text(prd_url.into(), "prd url")?);
        self.touch(clock);
        Ok(())
    }

    /// Appoints the project director.
    pub fn set_project_director(&mut self, director: EmployeeId, clock: &impl Clock) {
        self.project_director_id = Some(director);
        self.touch(clock);
    }

    /// Appoints the engineering director.
    pub fn set_engineering_director(&mut self, director: EmployeeId, clock: &impl Clock) {
        self.engineering_director_id = Some(director);
        self.touch(clock);
    }

    /// Appoints the QA director.
    pub fn set_qa_director(&mut self, director: EmployeeId, clock: &impl Clock) {
        self.qa_director_id = Some(director);
        self.touch(clock);
    }

    /// Adds a repository; adding a known repository changes nothing but the
    /// modification time.
    pub fn add_repo(&mut self, repo_id: RepoId, clock: &impl Clock) {
        self.repo_ids.insert(repo_id);
        self.touch(clock);
    }

    /// Removes a repository and reports whether it was present.
    pub fn remove_repo(&mut self, repo_id: &RepoId, clock: &impl Clock) -> bool {
        let removed = self.repo_ids.remove(repo_id);
        self.touch(clock);
        removed
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.header.touch(clock);
    }
}

impl Entity for Project {
    type Id = ProjectId;
    type Error = ProjectDomainError;
    const KIND: &'static str = "project";

    fn header(&self) -> &RecordHeader<ProjectId> {
        &self.header
    }

    fn validate(&self) -> Result<(), ProjectDomainError> {
        if self.name.trim().is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }
        for (value, field) in [(&self.description, "description"), (&self.prd_url, "prd url")] {
            if value.as_deref().is_some_and(|text| text.trim().is_empty()) {
                return Err(ProjectDomainError::BlankField(field));
            }
        }
        Ok(())
    }
}

impl TryFrom<PersistedProjectData> for Project {
    type Error = ProjectDomainError;

    fn try_from(data: PersistedProjectData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn require_text(value: String, field: &'static str) -> Result<String, ProjectDomainError> {
    if value.trim().is_empty() {
        return Err(ProjectDomainError::BlankField(field));
    }
    Ok(value)
}
