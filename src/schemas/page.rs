//! Paging request and response types
//!
//! Paging context is always passed explicitly to list calls.

use serde::{Deserialize, Serialize};

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A sort key, rendered as `field:direction`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Sort {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}

/// Which slice of a list to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub sort: Sort,
    /// Zero-based page number
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// First page ordered by `index:asc`, the order milestones and tasks are shown in
    pub fn by_index(size: u32) -> Self {
        PageRequest {
            sort: Sort::asc("index"),
            page: 0,
            size,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Query parameters in the order the API documents them
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sort", self.sort.to_string()),
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ]
    }
}

/// Paging metadata returned alongside a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// A page holding every item, for lists that fit in one response
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len();
        Page {
            pagination: Pagination {
                total: total as u64,
                page: 0,
                size: total as u32,
                total_pages: if total == 0 { 0 } else { 1 },
            },
            items,
        }
    }

    /// Whether a page exists after the zero-based page that was requested.
    ///
    /// The echoed `pagination.page` is not trusted; only `totalPages` is.
    pub fn has_page_after(&self, requested: u32) -> bool {
        requested.saturating_add(1) < self.pagination.total_pages
    }
}
