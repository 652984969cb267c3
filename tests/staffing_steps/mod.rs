//! Step definitions for staffing scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
