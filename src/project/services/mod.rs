//! Application services for projects.

mod portfolio;

pub use portfolio::{CreateProjectRequest, PortfolioError, PortfolioResult, PortfolioService};
