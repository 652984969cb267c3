//! Filtering and ranking for the decision radar feed.

use crate::{
    decision::domain::{Decision, DecisionCategory, DecisionImpact},
    entity::{ProjectId, RepoId},
    repository::ports::Criteria,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Narrows the decisions considered by the radar.
///
/// Unset fields do not filter. The creation window is inclusive at both
/// ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionFilter {
    category: Option<DecisionCategory>,
    impact: Option<DecisionImpact>,
    project_id: Option<ProjectId>,
    repo_id: Option<RepoId>,
    created_from: Option<DateTime<Utc>>,
    created_to: Option<DateTime<Utc>>,
    only_reversible: bool,
    only_unreversed: bool,
}

impl DecisionFilter {
    /// Creates a filter that keeps every decision.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps decisions in `category`.
    #[must_use]
    pub const fn with_category(mut self, category: DecisionCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Keeps decisions with exactly `impact`.
    #[must_use]
    pub const fn with_impact(mut self, impact: DecisionImpact) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Keeps decisions linked to `project_id`.
    #[must_use]
    pub fn for_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Keeps decisions linked to `repo_id`.
    #[must_use]
    pub fn for_repo(mut self, repo_id: RepoId) -> Self {
        self.repo_id = Some(repo_id);
        self
    }

    /// Keeps decisions recorded at or after `from`.
    #[must_use]
    pub const fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    /// Keeps decisions recorded at or before `to`.
    #[must_use]
    pub const fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.created_to = Some(to);
        self
    }

    /// Keeps only decisions marked reversible.
    #[must_use]
    pub const fn only_reversible(mut self) -> Self {
        self.only_reversible = true;
        self
    }

    /// Keeps only decisions that have not been reversed.
    #[must_use]
    pub const fn only_unreversed(mut self) -> Self {
        self.only_unreversed = true;
        self
    }

    /// Translates the equality parts of the filter into repository criteria.
    #[must_use]
    pub fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::all();
        if let Some(category) = self.category {
            criteria = criteria.with_field("category", category.as_str());
        }
        if let Some(impact) = self.impact {
            criteria = criteria.with_field("impact", impact.as_str());
        }
        if let Some(project_id) = &self.project_id {
            criteria = criteria.with_field("projectId", project_id.as_str());
        }
        if let Some(repo_id) = &self.repo_id {
            criteria = criteria.with_field("repoId", repo_id.as_str());
        }
        criteria
    }

    /// Returns whether `decision` passes every part of the filter.
    #[must_use]
    pub fn matches(&self, decision: &Decision) -> bool {
        let created_at = decision.created_at();
        self.category.is_none_or(|category| decision.category() == category)
            && self.impact.is_none_or(|impact| decision.impact() == impact)
            && self
                .project_id
                .as_ref()
                .is_none_or(|id| decision.project_id() == Some(id))
            && self
                .repo_id
                .as_ref()
                .is_none_or(|id| decision.repo_id() == Some(id))
            && self.created_from.is_none_or(|from| created_at >= from)
            && self.created_to.is_none_or(|to| created_at <= to)
            && (!self.only_reversible || decision.is_reversible())
            && (!self.only_unreversed || !decision.is_reversed())
    }
}

/// A decision paired with its ranking score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRadarItem {
    /// The ranked decision.
    pub decision: Decision,
    /// Impact weight times category weight.
    pub impact_score: f64,
}

/// Scores and orders decisions for the radar.
///
/// Higher scores come first; equal scores put the most recently recorded
/// decision first. At most `limit` items are returned.
#[must_use]
pub fn rank_decisions(
    decisions: impl IntoIterator<Item = Decision>,
    limit: usize,
) -> Vec<DecisionRadarItem> {
    let mut items: Vec<DecisionRadarItem> = decisions
        .into_iter()
        .map(|decision| DecisionRadarItem {
            impact_score: decision.impact_score(),
            decision,
        })
        .collect();
    items.sort_by(|left, right| {
        right
            .impact_score
            .total_cmp(&left.impact_score)
            .then_with(|| right.decision.created_at().cmp(&left.decision.created_at()))
    });
    items.truncate(limit);
    items
}
