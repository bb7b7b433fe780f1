use serde::{Deserialize, Serialize};

/// Pagination inputs shared by the list endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub per_page: i64,
    pub page: i64,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: i64 = 15;

    pub fn new(per_page: Option<i64>, page: Option<i64>) -> Self {
        Self {
            per_page: per_page.unwrap_or(Self::DEFAULT_PER_PAGE).max(1),
            page: page.unwrap_or(1).max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Rows to fetch: one extra row decides `has_more_pages` without a
    /// COUNT query.
    pub fn fetch_limit(&self) -> i64 {
        self.per_page + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Simple forward-only page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub per_page: i64,
    pub current_page: i64,
    pub has_more_pages: bool,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with `fetch_limit()`.
    pub fn from_rows(mut rows: Vec<T>, request: PageRequest) -> Self {
        let has_more_pages = rows.len() as i64 > request.per_page;
        rows.truncate(request.per_page as usize);

        Self {
            data: rows,
            per_page: request.per_page,
            current_page: request.page,
            has_more_pages,
        }
    }
}
