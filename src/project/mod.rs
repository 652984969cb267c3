//! Projects: portfolios of repositories with a status and directors.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
