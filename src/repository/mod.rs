//! Generic persistence contract shared by every aggregate.
//!
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod ports;

#[cfg(test)]
mod tests;
