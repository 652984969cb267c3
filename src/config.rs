//! Runtime configuration for repositories and services.
//!
//! Every struct implements [`Default`] and [`serde::Deserialize`], so host
//! applications can load overrides from whichever format they use and fall
//! back to defaults for missing keys.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtelierConfig {
    /// Repository limits.
    pub repository: RepositoryConfig,
    /// Decision radar defaults.
    pub decision_radar: DecisionRadarConfig,
}

/// Limits applied by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryConfig {
    /// Page size used when callers do not choose one.
    pub default_page_limit: usize,
    /// Largest page size a caller may request.
    pub max_page_limit: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            default_page_limit: 20,
            max_page_limit: 100,
        }
    }
}

impl RepositoryConfig {
    /// Creates a configuration with small pages.
    ///
    /// Useful for tests that exercise multi-page results.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            default_page_limit: 5,
            max_page_limit: 10,
        }
    }
}

/// Defaults for the ranked decision feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecisionRadarConfig {
    /// Number of entries returned when the caller does not set a limit.
    pub default_limit: usize,
}

impl Default for DecisionRadarConfig {
    fn default() -> Self {
        Self { default_limit: 20 }
    }
}
