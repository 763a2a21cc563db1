//! Page-based pagination: parameter validation and page metadata.
//!
//! Every list endpoint accepts `?page=&limit=` and returns a
//! `{ page, limit, total, pages }` block alongside the items. Validation
//! happens here, before any query runs, so malformed parameters never reach
//! the database.

use serde::Serialize;

use crate::error::CoreError;

/// Default number of items per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of items per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Validate raw `page`/`limit` query values.
    ///
    /// `page` must be >= 1 and `limit` in `1..=MAX_PAGE_LIMIT`; absent values
    /// fall back to defaults. Out-of-range values are a validation error, not
    /// silently clamped, so callers get a 400 instead of surprising results.
    pub fn from_params(page: Option<i64>, limit: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(CoreError::Validation(format!(
                "page must be a positive integer, got {page}"
            )));
        }

        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit < 1 || limit > MAX_PAGE_LIMIT {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"
            )));
        }

        Ok(Page { page, limit })
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Page metadata returned in every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PageMeta {
    /// Build metadata from a validated page and the total row count of the
    /// underlying filter (not the returned slice), so `pages` is correct even
    /// when the last page is partial.
    pub fn new(page: Page, total: i64) -> Self {
        // Ceiling division; limit is validated >= 1.
        PageMeta {
            page: page.page,
            limit: page.limit,
            total,
            pages: (total + page.limit - 1) / page.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let page = Page::from_params(None, None).unwrap();
        assert_eq!(page, Page { page: 1, limit: DEFAULT_PAGE_LIMIT });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let page = Page::from_params(Some(3), Some(25)).unwrap();
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn zero_page_is_rejected() {
        assert!(Page::from_params(Some(0), None).is_err());
    }

    #[test]
    fn negative_limit_is_rejected() {
        assert!(Page::from_params(Some(1), Some(-5)).is_err());
    }

    #[test]
    fn limit_above_max_is_rejected() {
        assert!(Page::from_params(Some(1), Some(MAX_PAGE_LIMIT + 1)).is_err());
    }

    #[test]
    fn pages_is_ceiling_of_total_over_limit() {
        let page = Page::from_params(Some(1), Some(20)).unwrap();
        assert_eq!(PageMeta::new(page, 0).pages, 0);
        assert_eq!(PageMeta::new(page, 1).pages, 1);
        assert_eq!(PageMeta::new(page, 20).pages, 1);
        assert_eq!(PageMeta::new(page, 21).pages, 2);
        assert_eq!(PageMeta::new(page, 40).pages, 2);
    }

    #[test]
    fn meta_echoes_request_values() {
        let page = Page::from_params(Some(2), Some(10)).unwrap();
        let meta = PageMeta::new(page, 35);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.limit, 10);
        assert_eq!(meta.total, 35);
        assert_eq!(meta.pages, 4);
    }
}
