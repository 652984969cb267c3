//! Source repositories and the employees who lead them.
//!
//! Not to be confused with [`crate::repository`], which holds the
//! persistence ports.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
