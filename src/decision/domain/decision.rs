//! Decision aggregate root.

use super::{DecisionCategory, DecisionDomainError, DecisionImpact, impact::impact_score};
use crate::entity::{
    DecisionId, EmployeeId, Entity, ProjectId, RecordHeader, RepoId, SessionId, timestamp,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Parameter object for recording a new decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDecision {
    /// Short headline.
    pub title: String,
    /// Situation that prompted the decision.
    pub context: String,
    /// What was decided.
    pub decision: String,
    /// Why it was decided.
    pub rationale: String,
    /// Expected consequences, if already known.
    pub consequences: Option<String>,
    /// Alternatives that were considered, in order.
    pub alternatives: Vec<String>,
    /// Impact level.
    pub impact: DecisionImpact,
    /// Category.
    pub category: DecisionCategory,
    /// Whether the decision may later be reversed.
    pub reversible: bool,
    /// Session in which the decision was made.
    pub session_id: Option<SessionId>,
    /// Repository the decision concerns.
    pub repo_id: Option<RepoId>,
    /// Project the decision concerns.
    pub project_id: Option<ProjectId>,
    /// Employee who made the decision.
    pub made_by_id: EmployeeId,
}

/// A logged decision.
///
/// Once reversed, a decision stays reversed; the reversal actor and time
/// are never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedDecisionData")]
pub struct Decision {
    #[serde(flatten)]
    header: RecordHeader<DecisionId>,
    title: String,
    context: String,
    decision: String,
    rationale: String,
    consequences: Option<String>,
    alternatives: Vec<String>,
    impact: DecisionImpact,
    category: DecisionCategory,
    session_id: Option<SessionId>,
    repo_id: Option<RepoId>,
    project_id: Option<ProjectId>,
    made_by_id: EmployeeId,
    reversible: bool,
    #[serde(with = "timestamp::option")]
    reversed_at: Option<DateTime<Utc>>,
    reversed_by: Option<EmployeeId>,
}

/// Parameter object for reconstructing a persisted decision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDecisionData {
    /// Persisted decision identifier.
    pub id: DecisionId,
    /// Short headline.
    pub title: String,
    /// Situation that prompted the decision.
    pub context: String,
    /// What was decided.
    pub decision: String,
    /// Why it was decided.
    pub rationale: String,
    /// Expected consequences, if any.
    #[serde(default)]
    pub consequences: Option<String>,
    /// Alternatives that were considered.
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Impact level.
    pub impact: DecisionImpact,
    /// Category.
    pub category: DecisionCategory,
    /// Session link.
    #[serde(default)]
    pub session_id: Option<SessionId>,
    /// Repository link.
    #[serde(default)]
    pub repo_id: Option<RepoId>,
    /// Project link.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Employee who made the decision.
    pub made_by_id: EmployeeId,
    /// Whether the decision may be reversed.
    pub reversible: bool,
    /// When the decision was reversed.
    #[serde(default, with = "timestamp::option")]
    pub reversed_at: Option<DateTime<Utc>>,
    /// Who reversed the decision.
    #[serde(default)]
    pub reversed_by: Option<EmployeeId>,
    /// Persisted creation timestamp.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Decision {
    /// Records a new, unreversed decision.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionDomainError::EmptyField`] naming the first blank
    /// text field.
    pub fn new(data: NewDecision, clock: &impl Clock) -> Result<Self, DecisionDomainError> {
        let decision = Self {
            header: RecordHeader::new(DecisionId::new(), clock),
            title: data.title,
            context: data.context,
            decision: data.decision,
            rationale: data.rationale,
            consequences: data.consequences,
            alternatives: data.alternatives,
            impact: data.impact,
            category: data.category,
            session_id: data.session_id,
            repo_id: data.repo_id,
            project_id: data.project_id,
            made_by_id: data.made_by_id,
            reversible: data.reversible,
            reversed_at: None,
            reversed_by: None,
        };
        decision.validate()?;
        Ok(decision)
    }

    /// Reconstructs a decision from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns a [`DecisionDomainError`] when the data violates a decision
    /// invariant.
    pub fn from_persisted(data: PersistedDecisionData) -> Result<Self, DecisionDomainError> {
        let decision = Self {
            header: RecordHeader::from_persisted(data.id, data.created_at, data.updated_at)?,
            title: data.title,
            context: data.context,
            decision: data.decision,
            rationale: data.rationale,
            consequences: data.consequences,
            alternatives: data.alternatives,
            impact: data.impact,
            category: data.category,
            session_id: data.session_id,
            repo_id: data.repo_id,
            project_id: data.project_id,
            made_by_id: data.made_by_id,
            reversible: data.reversible,
            reversed_at: data.reversed_at,
            reversed_by: data.reversed_by,
        };
        decision.validate()?;
        Ok(decision)
    }

    /// Returns the decision identifier.
    #[must_use]
    pub const fn id(&self) -> &DecisionId {
        self.header.id()
    }

    /// Returns when the decision was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.header.created_at()
    }

    /// Returns when the decision last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.header.updated_at()
    }

    /// Returns the headline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the context.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns what was decided.
    #[must_use]
    pub fn decision(&self) -> &str {
        &self.decision
    }

    /// Returns the rationale.
    #[must_use]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    /// Returns the recorded consequences.
    #[must_use]
    pub fn consequences(&self) -> Option<&str> {
        self.consequences.as_deref()
    }

    /// Returns the alternatives considered.
    #[must_use]
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// Returns the impact level.
    #[must_use]
    pub const fn impact(&self) -> DecisionImpact {
        self.impact
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> DecisionCategory {
        self.category
    }

    /// Returns the session link.
    #[must_use]
    pub const fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Returns the repository link.
    #[must_use]
    pub const fn repo_id(&self) -> Option<&RepoId> {
        self.repo_id.as_ref()
    }

    /// Returns the project link.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns who made the decision.
    #[must_use]
    pub const fn made_by_id(&self) -> &EmployeeId {
        &self.made_by_id
    }

    /// Returns whether the decision was marked reversible.
    #[must_use]
    pub const fn is_reversible(&self) -> bool {
        self.reversible
    }

    /// Returns when the decision was reversed.
    #[must_use]
    pub const fn reversed_at(&self) -> Option<DateTime<Utc>> {
        self.reversed_at
    }

    /// Returns who reversed the decision.
    #[must_use]
    pub const fn reversed_by(&self) -> Option<&EmployeeId> {
        self.reversed_by.as_ref()
    }

    /// Returns whether the decision has been reversed.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed_at.is_some()
    }

    /// Returns whether [`Decision::reverse`] would succeed.
    #[must_use]
    pub const fn can_be_reversed(&self) -> bool {
        self.reversible && !self.is_reversed()
    }

    /// Ranking score: impact weight times category weight.
    #[must_use]
    pub fn impact_score(&self) -> f64 {
        impact_score(self.impact, self.category)
    }

    /// Reverses the decision on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionDomainError::CannotReverse`] when the decision is
    /// irreversible or already reversed.
    pub fn reverse(
        &mut self,
        actor: EmployeeId,
        clock: &impl Clock,
    ) -> Result<(), DecisionDomainError> {
        if !self.can_be_reversed() {
            return Err(DecisionDomainError::CannotReverse(self.id().clone()));
        }
        self.reversed_at = Some(timestamp::now(clock));
        self.reversed_by = Some(actor);
        self.touch(clock);
        Ok(())
    }

    /// Replaces the rationale.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionDomainError::EmptyField`] when the rationale is
    /// blank.
    pub fn update_rationale(
        &mut self,
        rationale: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), DecisionDomainError> {
        let value = rationale.into();
        require_text(&value, "rationale")?;
        self.rationale = value;
        self.touch(clock);
        Ok(())
    }

    /// Records the observed consequences, replacing earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionDomainError::EmptyField`] when the text is blank.
    pub fn add_consequences(
        &mut self,
        consequences: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), DecisionDomainError> {
        let value = consequences.into();
        require_text(&value, "consequences")?;
        self.consequences = Some(value);
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.header.touch(clock);
    }
}

impl Entity for Decision {
    type Id = DecisionId;
    type Error = DecisionDomainError;
    const KIND: &'static str = "decision";

    fn header(&self) -> &RecordHeader<DecisionId> {
        &self.header
    }

    fn validate(&self) -> Result<(), DecisionDomainError> {
        require_text(&self.title, "title")?;
        require_text(&self.context, "context")?;
        require_text(&self.decision, "decision")?;
        require_text(&self.rationale, "rationale")?;
        if let Some(consequences) = &self.consequences {
            require_text(consequences, "consequences")?;
        }
        let reversal_recorded = self.reversed_at.is_some();
        if reversal_recorded != self.reversed_by.is_some()
            || (reversal_recorded && !self.reversible)
        {
            return Err(DecisionDomainError::InconsistentReversal(self.id().clone()));
        }
        Ok(())
    }
}

impl TryFrom<PersistedDecisionData> for Decision {
    type Error = DecisionDomainError;

    fn try_from(data: PersistedDecisionData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), DecisionDomainError> {
    if value.trim().is_empty() {
        return Err(DecisionDomainError::EmptyField(field));
    }
    Ok(())
}
