//! Task lifecycle management.
//!
//! Tasks capture raw work requests, are refined until they carry a title,
//! description, and requirements, and are then accepted by exactly one
//! worker. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]
//!
//! Persistence goes through the generic
//! [`Repository`](crate::repository::ports::Repository) port.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
