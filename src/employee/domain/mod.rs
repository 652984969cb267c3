//! Domain model for employees.

mod employee;
mod error;
mod level;

pub use employee::{Employee, PersistedEmployeeData};
pub use error::EmployeeDomainError;
pub use level::{AgentType, SeniorityLevel};
