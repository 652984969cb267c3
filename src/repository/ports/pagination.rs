//! Pagination request and response types.

use crate::config::RepositoryConfig;
use serde::{Deserialize, Serialize};

/// Sort direction for paged queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest values first.
    #[default]
    Asc,
    /// Largest values first.
    Desc,
}

/// Page selection and ordering for a paged query.
///
/// Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    /// 1-based page number.
    pub page: usize,
    /// Maximum number of items per page.
    pub limit: usize,
    /// Serialised field to sort by; storage order when absent.
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Sort direction.
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl PaginationOptions {
    /// Creates unsorted options for a page.
    #[must_use]
    pub const fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            sort_by: None,
            sort_order: SortOrder::Asc,
        }
    }

    /// Creates options for the first page at the configured default size.
    #[must_use]
    pub const fn first_page(config: &RepositoryConfig) -> Self {
        Self::new(1, config.default_page_limit)
    }

    /// Sorts results by a serialised field.
    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = order;
        self
    }

    /// Returns the number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Number of items matching the query across all pages.
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    /// Page size used for the query.
    pub limit: usize,
    /// Number of pages, `ceil(total / limit)`.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Assembles a page, deriving `total_pages` from `total` and `limit`.
    #[must_use]
    pub fn new(data: Vec<T>, total: usize, options: &PaginationOptions) -> Self {
        Self {
            data,
            total,
            page: options.page,
            limit: options.limit,
            total_pages: total_pages(total, options.limit),
        }
    }
}

/// Returns `ceil(total / limit)`, or zero when `limit` is zero.
#[must_use]
pub const fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}
