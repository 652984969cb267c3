//! Decision log and decision radar.
//!
//! Decisions record why a change of direction was made, who made it, and
//! how much it matters. Reversible decisions may be reversed exactly once.
//! The [`services::DecisionLogService`] persists decisions and ranks them
//! into a radar feed by impact score.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
