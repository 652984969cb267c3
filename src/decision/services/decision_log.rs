//! Service layer for recording, amending, and ranking decisions.

use super::radar::{DecisionFilter, DecisionRadarItem, rank_decisions};
use crate::{
    config::DecisionRadarConfig,
    decision::domain::{
        Decision, DecisionCategory, DecisionDomainError, DecisionImpact, NewDecision,
    },
    entity::{DecisionId, EmployeeId, InvalidEntityId, ProjectId, RepoId, SessionId},
    repository::ports::{Repository, RepositoryError},
    service::{ErrorCode, ServiceError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for recording a decision from boundary input.
///
/// Impact and category arrive as their lowercase tags and identifiers as
/// plain strings; both are validated when the decision is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecisionRequest {
    title: String,
    context: String,
    decision: String,
    rationale: String,
    consequences: Option<String>,
    alternatives: Vec<String>,
    impact: String,
    category: String,
    reversible: bool,
    session_id: Option<String>,
    repo_id: Option<String>,
    project_id: Option<String>,
    made_by_id: String,
}

impl RecordDecisionRequest {
    /// Creates an irreversible decision request with empty narrative fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        impact: impl Into<String>,
        category: impl Into<String>,
        made_by_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            context: String::new(),
            decision: String::new(),
            rationale: String::new(),
            consequences: None,
            alternatives: Vec::new(),
            impact: impact.into(),
            category: category.into(),
            reversible: false,
            session_id: None,
            repo_id: None,
            project_id: None,
            made_by_id: made_by_id.into(),
        }
    }

    /// Sets the context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Sets what was decided.
    #[must_use]
    pub fn with_decision(mut self, decision: impl Into<String>) -> Self {
        self.decision = decision.into();
        self
    }

    /// Sets the rationale.
    #[must_use]
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Sets the expected consequences.
    #[must_use]
    pub fn with_consequences(mut self, consequences: impl Into<String>) -> Self {
        self.consequences = Some(consequences.into());
        self
    }

    /// Sets the alternatives considered.
    #[must_use]
    pub fn with_alternatives(mut self, alternatives: impl IntoIterator<Item = String>) -> Self {
        self.alternatives = alternatives.into_iter().collect();
        self
    }

    /// Marks the decision as reversible.
    #[must_use]
    pub const fn reversible(mut self) -> Self {
        self.reversible = true;
        self
    }

    /// Links the decision to a session.
    #[must_use]
    pub fn in_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Links the decision to a repository.
    #[must_use]
    pub fn for_repo(mut self, repo_id: impl Into<String>) -> Self {
        self.repo_id = Some(repo_id.into());
        self
    }

    /// Links the decision to a project.
    #[must_use]
    pub fn for_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    fn into_new_decision(self) -> Result<NewDecision, DecisionDomainError> {
        Ok(NewDecision {
            impact: DecisionImpact::try_from(self.impact.as_str())?,
            category: DecisionCategory::try_from(self.category.as_str())?,
            title: self.title,
            context: self.context,
            decision: self.decision,
            rationale: self.rationale,
            consequences: self.consequences,
            alternatives: self.alternatives,
            reversible: self.reversible,
            session_id: parse_optional(self.session_id, SessionId::parse)?,
            repo_id: parse_optional(self.repo_id, RepoId::parse)?,
            project_id: parse_optional(self.project_id, ProjectId::parse)?,
            made_by_id: EmployeeId::parse(self.made_by_id)?,
        })
    }
}

fn parse_optional<T>(
    raw: Option<String>,
    parse: fn(String) -> Result<T, InvalidEntityId>,
) -> Result<Option<T>, InvalidEntityId> {
    raw.map(parse).transpose()
}

/// Service-level errors for decision log operations.
#[derive(Debug, Error)]
pub enum DecisionLogError {
    /// Domain validation or reversal failed.
    #[error(transparent)]
    Domain(#[from] DecisionDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError for DecisionLogError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Domain(err) => err.kind().into(),
            Self::Repository(err) => err.code(),
        }
    }
}

/// Result type for decision log operations.
pub type DecisionLogResult<T> = Result<T, DecisionLogError>;

/// Decision log orchestration service.
#[derive(Clone)]
pub struct DecisionLogService<R, C>
where
    R: Repository<Decision>,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    radar: DecisionRadarConfig,
}

impl<R, C> DecisionLogService<R, C>
where
    R: Repository<Decision>,
    C: Clock + Send + Sync,
{
    /// Creates a decision log service with default radar settings.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, DecisionRadarConfig::default())
    }

    /// Creates a decision log service with explicit radar settings.
    #[must_use]
    pub const fn with_config(
        repository: Arc<R>,
        clock: Arc<C>,
        radar: DecisionRadarConfig,
    ) -> Self {
        Self {
            repository,
            clock,
            radar,
        }
    }

    /// Validates and persists a new decision.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionLogError::Domain`] when a text field is blank, the
    /// impact or category tag is unknown, or an identifier is blank.
    #[instrument(skip(self, request))]
    pub async fn record_decision(
        &self,
        request: RecordDecisionRequest,
    ) -> DecisionLogResult<Decision> {
        let data = request.into_new_decision()?;
        let decision = Decision::new(data, &*self.clock)?;
        let stored = self.repository.create(&decision).await?;
        info!(
            decision_id = %stored.id(),
            impact = %stored.impact(),
            category = %stored.category(),
            "decision recorded"
        );
        Ok(stored)
    }

    /// Finds a decision by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionLogError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: &DecisionId) -> DecisionLogResult<Option<Decision>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Reverses a decision on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionLogError::Domain`] with
    /// [`DecisionDomainError::CannotReverse`] when the decision is
    /// irreversible or already reversed.
    #[instrument(skip(self), fields(decision_id = %id, actor = %actor))]
    pub async fn reverse_decision(
        &self,
        id: &DecisionId,
        actor: EmployeeId,
    ) -> DecisionLogResult<Decision> {
        self.apply(id, "reverse", move |decision, clock| decision.reverse(actor, clock))
            .await
    }

    /// Replaces a decision's rationale.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionLogError::Domain`] when the rationale is blank.
    #[instrument(skip(self, rationale), fields(decision_id = %id))]
    pub async fn update_rationale(
        &self,
        id: &DecisionId,
        rationale: String,
    ) -> DecisionLogResult<Decision> {
        self.apply(id, "update_rationale", move |decision, clock| {
            decision.update_rationale(rationale, clock)
        })
        .await
    }

    /// Records the observed consequences of a decision.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionLogError::Domain`] when the text is blank.
    #[instrument(skip(self, consequences), fields(decision_id = %id))]
    pub async fn add_consequences(
        &self,
        id: &DecisionId,
        consequences: String,
    ) -> DecisionLogResult<Decision> {
        self.apply(id, "add_consequences", move |decision, clock| {
            decision.add_consequences(consequences, clock)
        })
        .await
    }

    /// Returns the ranked decision feed.
    ///
    /// `limit` defaults to the configured radar size.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionLogError::Repository`] when lookup fails.
    #[instrument(skip(self, filter))]
    pub async fn decision_radar(
        &self,
        filter: &DecisionFilter,
        limit: Option<usize>,
    ) -> DecisionLogResult<Vec<DecisionRadarItem>> {
        let candidates = self.repository.find_all(&filter.criteria()).await?;
        let size = limit.unwrap_or(self.radar.default_limit);
        let ranked = rank_decisions(
            candidates
                .into_iter()
                .filter(|decision| filter.matches(decision)),
            size,
        );
        debug!(returned = ranked.len(), size, "decision radar ranked");
        Ok(ranked)
    }

    async fn apply<F>(
        &self,
        id: &DecisionId,
        operation: &'static str,
        change: F,
    ) -> DecisionLogResult<Decision>
    where
        F: FnOnce(&mut Decision, &C) -> Result<(), DecisionDomainError> + Send,
    {
        let mut decision = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Decision>(id))?;

        if let Err(err) = change(&mut decision, &*self.clock) {
            warn!(decision_id = %id, operation, error = %err, "decision change rejected");
            return Err(err.into());
        }

        let stored = self.repository.update(id, &decision).await?;
        debug!(decision_id = %id, operation, "decision updated");
        Ok(stored)
    }
}
