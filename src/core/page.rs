//! Page requests and paginated results

use crate::core::sort::Sort;
use serde::{Deserialize, Serialize};

/// Largest page size a request may ask for
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used when none is given
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Request for one page of an ordered result
///
/// Pages start at 1. Out-of-range values are clamped rather than rejected.
///
/// # Example
/// ```rust,ignore
/// let request = PageRequest::of(2, 10).with_sort(Sort::parse("price:desc")?);
/// let page = repository.find_page(&request).await?;
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PageRequest {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub size: usize,

    /// Ordering applied before slicing
    pub sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::unsorted(),
        }
    }
}

impl PageRequest {
    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort: Sort::unsorted(),
        }
    }

    pub fn with_sort(mut self, sort: impl Into<Sort>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get size, ensuring it stays within 1..=MAX_PAGE_SIZE
    pub fn size(&self) -> usize {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of items to skip before this page
    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.size())
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The items on this page
    pub content: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}
