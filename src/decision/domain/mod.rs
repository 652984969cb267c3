//! Domain model for logged decisions.

mod decision;
mod error;
mod impact;

pub use decision::{Decision, NewDecision, PersistedDecisionData};
pub use error::DecisionDomainError;
pub use impact::{DecisionCategory, DecisionImpact};
