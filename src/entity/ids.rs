//! Opaque string identifiers for every aggregate.
//!
//! Identifiers are generated as UUID v4 strings but any non-blank string is
//! accepted when parsing, so records created by other systems (for example
//! `emp-1`) remain addressable.

use super::InvalidEntityId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Parses an identifier from an existing string.
            ///
            /// Surrounding whitespace is trimmed.
            ///
            /// # Errors
            ///
            /// Returns [`InvalidEntityId`] when the value is blank.
            pub fn parse(value: impl Into<String>) -> Result<Self, InvalidEntityId> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(InvalidEntityId::new(stringify!($name)));
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidEntityId;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a task.
    TaskId
);
entity_id!(
    /// Identifier of a logged decision.
    DecisionId
);
entity_id!(
    /// Identifier of an employee (an agent orchestrator).
    EmployeeId
);
entity_id!(
    /// Identifier of a project.
    ProjectId
);
entity_id!(
    /// Identifier of a locally cloned repository.
    RepoId
);
entity_id!(
    /// Identifier of the working session a decision was made in.
    SessionId
);
