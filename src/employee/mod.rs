//! Employees: the agents that pick up and complete tasks.
//!
//! An employee holds at most one active task and climbs a fixed seniority
//! ladder. [`services::StaffingService`] coordinates employees with the task
//! lifecycle so that accepting and finishing work updates both sides.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
