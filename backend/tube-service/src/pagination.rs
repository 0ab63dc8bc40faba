//! Offset pagination.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw `?page=&limit=` values. Anything unparsable falls back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = limit
            .filter(|l| *l >= 1)
            .map(|l| l.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, limit }
    }

    pub fn from_query(query: &PageQuery) -> Self {
        Self::new(
            query.page.as_deref().and_then(|p| p.trim().parse().ok()),
            query.limit.as_deref().and_then(|l| l.trim().parse().ok()),
        )
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`; zero when there is nothing to show.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub docs: Vec<T>,
    pub total_docs: i64,
    pub limit: i64,
    pub page: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> Page<T> {
    pub fn new(docs: Vec<T>, total_docs: i64, pagination: Pagination) -> Self {
        let total_pages = pagination.total_pages(total_docs);
        Self {
            docs,
            total_docs,
            limit: pagination.limit,
            page: pagination.page,
            total_pages,
            has_next_page: pagination.page < total_pages,
            has_prev_page: pagination.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamping() {
        assert_eq!(Pagination::new(None, None), Pagination { page: 1, limit: 10 });
        assert_eq!(Pagination::new(Some(0), Some(0)), Pagination { page: 1, limit: 10 });
        assert_eq!(Pagination::new(Some(-3), Some(500)).limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn garbage_query_values_fall_back() {
        let query = PageQuery {
            page: Some("two".into()),
            limit: Some("".into()),
        };
        assert_eq!(Pagination::from_query(&query), Pagination::default());
    }

    #[test]
    fn fifteen_items_second_page() {
        let pagination = Pagination::new(Some(2), Some(10));
        assert_eq!(pagination.offset(), 10);
        assert_eq!(pagination.total_pages(15), 2);

        let page = Page::new(vec![0; 5], 15, pagination);
        assert_eq!(page.docs.len(), 5);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<u8> = Page::new(vec![], 0, Pagination::default());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
    }
}
