//! Impact levels, categories, and their ranking weights.

use super::DecisionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much a decision matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionImpact {
    /// Local, easily absorbed.
    Low,
    /// Affects a component.
    Medium,
    /// Affects several components or teams.
    High,
    /// Affects the whole system.
    Critical,
}

impl DecisionImpact {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Ranking weight; doubles with each severity step.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 4,
            Self::Critical => 8,
        }
    }
}

impl fmt::Display for DecisionImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DecisionImpact {
    type Error = DecisionDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(DecisionDomainError::InvalidImpact(value.to_owned())),
        }
    }
}

/// Area of the product a decision belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionCategory {
    /// System structure and boundaries.
    Architectural,
    /// Libraries, tooling, implementation approach.
    Technical,
    /// How the team works.
    Process,
    /// What gets built.
    Product,
    /// Running and maintaining the system.
    Operational,
}

impl DecisionCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Architectural => "architectural",
            Self::Technical => "technical",
            Self::Process => "process",
            Self::Product => "product",
            Self::Operational => "operational",
        }
    }

    /// Ranking multiplier applied to the impact weight.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Architectural => 1.5,
            Self::Technical => 1.2,
            Self::Process => 1.0,
            Self::Product => 1.3,
            Self::Operational => 0.8,
        }
    }
}

impl fmt::Display for DecisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DecisionCategory {
    type Error = DecisionDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "architectural" => Ok(Self::Architectural),
            "technical" => Ok(Self::Technical),
            "process" => Ok(Self::Process),
            "product" => Ok(Self::Product),
            "operational" => Ok(Self::Operational),
            _ => Err(DecisionDomainError::InvalidCategory(value.to_owned())),
        }
    }
}

/// Scores a decision for radar ranking.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "category weights are fractional multipliers"
)]
pub(crate) fn impact_score(impact: DecisionImpact, category: DecisionCategory) -> f64 {
    f64::from(impact.weight()) * category.weight()
}
