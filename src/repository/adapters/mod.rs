//! Adapter implementations of the repository port.

pub mod memory;
