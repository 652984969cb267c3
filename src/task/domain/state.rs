//! Task lifecycle states.

use super::ParseTaskStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
///
/// Work moves forward through `Open → Ready → InProgress → Done`; `Closed`
/// is reachable from every other state and is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Task captured but not yet specified well enough to start.
    Open,
    /// Task has a title, description, and requirements.
    Ready,
    /// A worker has accepted the task.
    InProgress,
    /// Work has been completed.
    Done,
    /// Task has been abandoned or archived.
    Closed,
}

impl TaskState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Ready => "ready",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Closed => "closed",
        }
    }

    /// Returns whether no further work is expected.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Done | Self::Closed)
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Ready)
                | (Self::Ready, Self::InProgress)
                | (Self::InProgress, Self::Done)
                | (
                    Self::Open | Self::Ready | Self::InProgress | Self::Done,
                    Self::Closed
                )
        )
    }

    /// Returns whether a task in this state must be fully specified.
    pub(crate) const fn requires_specification(self) -> bool {
        matches!(self, Self::Ready | Self::InProgress | Self::Done)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "ready" => Ok(Self::Ready),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}
