//! Page/page-size normalization shared by every paginated read.

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw pagination query as received from a request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Validated pagination parameters. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    /// Clamp arbitrary input into bounds: page >= 0, page size in [1, 100].
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32;
        let page_size = page_size
            .unwrap_or(i64::from(DEFAULT_PAGE_SIZE))
            .clamp(i64::from(MIN_PAGE_SIZE), i64::from(MAX_PAGE_SIZE)) as u32;
        Self { page, page_size }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize).saturating_mul(self.page_size as usize)
    }

    /// One-based page number as the hosting API expects it.
    pub fn upstream_page(&self) -> u32 {
        self.page.saturating_add(1)
    }
}

impl From<PaginationQuery> for PaginationParams {
    fn from(query: PaginationQuery) -> Self {
        Self::new(query.page, query.page_size)
    }
}
