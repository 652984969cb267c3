//! Repo aggregate root.

use super::RepoDomainError;
use crate::employee::domain::Employee;
use crate::entity::{EmployeeId, Entity, RecordHeader, RepoId, timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Parameter object for registering a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepo {
    /// Display name.
    pub name: String,
    /// Remote URL, such as `https://github.com/org/repo.git`.
    pub remote: String,
    /// Checkout location on disk.
    pub local_path: String,
    /// Branch new work starts from.
    pub default_branch: String,
}

/// Leadership roles on a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoRole {
    /// Owns the technical design.
    LeadArchitect,
    /// Owns scope and schedule.
    ProjectManager,
    /// Owns quality.
    QaLead,
}

impl RepoRole {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeadArchitect => "lead_architect",
            Self::ProjectManager => "project_manager",
            Self::QaLead => "qa_lead",
        }
    }
}

impl fmt::Display for RepoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source repository checked out locally.
///
/// Name, remote, path, and default branch are fixed at registration. Leads
/// can only be set from a full [`Employee`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedRepoData")]
pub struct Repo {
    #[serde(flatten)]
    header: RecordHeader<RepoId>,
    name: String,
    remote: String,
    local_path: String,
    default_branch: String,
    lead_architect_id: Option<EmployeeId>,
    project_manager_id: Option<EmployeeId>,
    qa_lead_id: Option<EmployeeId>,
}

/// Parameter object for reconstructing a persisted repo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRepoData {
    /// Persisted repo identifier.
    pub id: RepoId,
    /// Display name.
    pub name: String,
    /// Remote URL.
    pub remote: String,
    /// Checkout location.
    pub local_path: String,
    /// Default branch.
    pub default_branch: String,
    /// Lead architect, if appointed.
    #[serde(default)]
    pub lead_architect_id: Option<EmployeeId>,
    /// Project manager, if appointed.
    #[serde(default)]
    pub project_manager_id: Option<EmployeeId>,
    /// QA lead, if appointed.
    #[serde(default)]
    pub qa_lead_id: Option<EmployeeId>,
    /// Persisted creation timestamp.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Repo {
    /// Registers a repository with no leads.
    ///
    /// # Errors
    ///
    /// Returns [`RepoDomainError::EmptyField`] naming the first blank field,
    /// or [`RepoDomainError::InvalidRemote`] when the remote lacks a scheme.
    pub fn new(data: NewRepo, clock: &impl Clock) -> Result<Self, RepoDomainError> {
        let repo = Self {
            header: RecordHeader::new(RepoId::new(), clock),
            name: data.name,
            remote: data.remote,
            local_path: data.local_path,
            default_branch: data.default_branch,
            lead_architect_id: None,
            project_manager_id: None,
            qa_lead_id: None,
        };
        repo.validate()?;
        Ok(repo)
    }

    /// Reconstructs a repo from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns a [`RepoDomainError`] when the data violates a repo
    /// invariant.
    pub fn from_persisted(data: PersistedRepoData) -> Result<Self, RepoDomainError> {
        let repo = Self {
            header: RecordHeader::from_persisted(data.id, data.created_at, data.updated_at)?,
            name: data.name,
            remote: data.remote,
            local_path: data.local_path,
            default_branch: data.default_branch,
            lead_architect_id: data.lead_architect_id,
            project_manager_id: data.project_manager_id,
            qa_lead_id: data.qa_lead_id,
        };
        repo.validate()?;
        Ok(repo)
    }

    /// Returns the repo identifier.
    #[must_use]
    pub const fn id(&self) -> &RepoId {
        self.header.id()
    }

    /// Returns when the repo was registered.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.header.created_at()
    }

    /// Returns when the repo last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.header.updated_at()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the remote URL.
    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Returns the checkout location.
    #[must_use]
    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    /// Returns the default branch.
    #[must_use]
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Returns the lead architect.
    #[must_use]
    pub const fn lead_architect_id(&self) -> Option<&EmployeeId> {
        self.lead_architect_id.as_ref()
    }

    /// Returns the project manager.
    #[must_use]
    pub const fn project_manager_id(&self) -> Option<&EmployeeId> {
        self.project_manager_id.as_ref()
    }

    /// Returns the QA lead.
    #[must_use]
    pub const fn qa_lead_id(&self) -> Option<&EmployeeId> {
        self.qa_lead_id.as_ref()
    }

    /// Returns the employee holding `role`.
    #[must_use]
    pub const fn lead(&self, role: RepoRole) -> Option<&EmployeeId> {
        match role {
            RepoRole::LeadArchitect => self.lead_architect_id(),
            RepoRole::ProjectManager => self.project_manager_id(),
            RepoRole::QaLead => self.qa_lead_id(),
        }
    }

    /// Appoints `architect` as lead architect.
    pub fn set_lead_architect(&mut self, architect: &Employee, clock: &impl Clock) {
        self.appoint(RepoRole::LeadArchitect, architect, clock);
    }

    /// Appoints `manager` as project manager.
    pub fn set_project_manager(&mut self, manager: &Employee, clock: &impl Clock) {
        self.appoint(RepoRole::ProjectManager, manager, clock);
    }

    /// Appoints `lead` as QA lead.
    pub fn set_qa_lead(&mut self, lead: &Employee, clock: &impl Clock) {
        self.appoint(RepoRole::QaLead, lead, clock);
    }

    /// Appoints `employee` to `role`, replacing any previous holder.
    pub fn appoint(&mut self, role: RepoRole, employee: &Employee, clock: &impl Clock) {
        let slot = match role {
            RepoRole::LeadArchitect => &mut self.lead_architect_id,
            RepoRole::ProjectManager => &mut self.project_manager_id,
            RepoRole::QaLead => &mut self.qa_lead_id,
        };
        *slot = Some(employee.id().clone());
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.header.touch(clock);
    }
}

impl Entity for Repo {
    type Id = RepoId;
    type Error = RepoDomainError;
    const KIND: &'static str = "repo";

    fn header(&self) -> &RecordHeader<RepoId> {
        &self.header
    }

    fn validate(&self) -> Result<(), RepoDomainError> {
        require_text(&self.name, "name")?;
        require_text(&self.remote, "remote")?;
        if !has_url_scheme(&self.remote) {
            return Err(RepoDomainError::InvalidRemote(self.remote.clone()));
        }
        require_text(&self.local_path, "local path")?;
        require_text(&self.default_branch, "default branch")?;
        Ok(())
    }
}

impl TryFrom<PersistedRepoData> for Repo {
    type Error = RepoDomainError;

    fn try_from(data: PersistedRepoData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), RepoDomainError> {
    if value.trim().is_empty() {
        return Err(RepoDomainError::EmptyField(field));
    }
    Ok(())
}

// `scheme://` prefix that also parses as an absolute, hierarchical URL.
fn has_url_scheme(remote: &str) -> bool {
    let Some((scheme, _)) = remote.split_once("://") else {
        return false;
    };
    Url::parse(remote)
        .is_ok_and(|url| url.scheme().eq_ignore_ascii_case(scheme) && !url.cannot_be_a_base())
}
