//! Agent runtimes and the seniority ladder.

use super::EmployeeDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime an employee is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// Letta agent.
    Letta,
    /// Agno agent.
    Agno,
    /// Claude agent.
    Claude,
    /// Any other runtime.
    Custom,
}

impl AgentType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Letta => "letta",
            Self::Agno => "agno",
            Self::Claude => "claude",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentType {
    type Error = EmployeeDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "letta" => Ok(Self::Letta),
            "agno" => Ok(Self::Agno),
            "claude" => Ok(Self::Claude),
            "custom" => Ok(Self::Custom),
            _ => Err(EmployeeDomainError::InvalidAgentType(value.to_owned())),
        }
    }
}

/// Seniority ladder, ordered from most junior to most senior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityLevel {
    /// Learning the ropes.
    #[default]
    Junior,
    /// Competent contributor.
    Mid,
    /// Autonomous, high impact.
    Senior,
    /// Strategic leadership.
    Principal,
    /// Exceptional expertise.
    Fellow,
}

impl SeniorityLevel {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Principal => "principal",
            Self::Fellow => "fellow",
        }
    }

    /// Position on the ladder, starting at 1 for `Junior`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Junior => 1,
            Self::Mid => 2,
            Self::Senior => 3,
            Self::Principal => 4,
            Self::Fellow => 5,
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SeniorityLevel {
    type Error = EmployeeDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "junior" => Ok(Self::Junior),
            "mid" => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            "principal" => Ok(Self::Principal),
            "fellow" => Ok(Self::Fellow),
            _ => Err(EmployeeDomainError::InvalidSeniority(value.to_owned())),
        }
    }
}
