//! Page/limit normalization and the paginated response envelope.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Raw `page`/`limit` query parameters. Kept as strings so malformed values
/// fall back to defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Normalized paging window. Only [`PageParams::normalize`] builds one, so
/// `limit` is always in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: i64,
    limit: i64,
    offset: i64,
}

impl PageParams {
    /// Lenient normalization: unparseable input takes the default, then
    /// `page < 1 → 1`, `limit < 1 → 10`, `limit > 100 → 100`.
    pub fn normalize(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_LIMIT);

        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let limit = if limit < 1 {
            DEFAULT_LIMIT
        } else if limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            limit
        };

        Self {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl From<&PageQuery> for PageParams {
    fn from(q: &PageQuery) -> Self {
        Self::normalize(q.page.as_deref(), q.limit.as_deref())
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::normalize(None, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(params: PageParams, total_items: i64) -> Self {
        let total_items = total_items.max(0);
        Self {
            current_page: params.page,
            page_size: params.limit,
            total_items,
            total_pages: (total_items + params.limit - 1) / params.limit,
        }
    }
}

/// One page of rows plus the total matching count, as read by a repository.
///
/// `items` and `total` come from two separate round trips and are not
/// read under one snapshot; concurrent writes can make them disagree
/// slightly.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> Paginated<T> {
    pub fn from_page(page: Page<T>, params: PageParams) -> Self {
        Self {
            data: page.items,
            pagination: Pagination::new(params, page.total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let p = PageParams::normalize(None, None);
        assert_eq!(p, PageParams { page: 1, limit: 10, offset: 0 });
    }

    #[test]
    fn offset_follows_page_and_limit() {
        for (page, limit) in [(1, 1), (2, 10), (7, 25), (3, 100)] {
            let p = PageParams::normalize(Some(&page.to_string()), Some(&limit.to_string()));
            assert_eq!(p.page(), page);
            assert_eq!(p.limit(), limit);
            assert_eq!(p.offset(), (page - 1) * limit);
        }
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageParams::normalize(None, Some("0")).limit, 10);
        assert_eq!(PageParams::normalize(None, Some("-5")).limit, 10);
        assert_eq!(PageParams::normalize(None, Some("101")).limit, 100);
        assert_eq!(PageParams::normalize(None, Some("100")).limit, 100);
    }

    #[test]
    fn non_positive_page_becomes_first() {
        let p = PageParams::normalize(Some("0"), Some("20"));
        assert_eq!((p.page, p.offset), (1, 0));
        let p = PageParams::normalize(Some("-3"), None);
        assert_eq!((p.page, p.offset), (1, 0));
    }

    #[test]
    fn malformed_input_falls_back_to_defaults() {
        let p = PageParams::normalize(Some("abc"), Some("ten"));
        assert_eq!(p, PageParams { page: 1, limit: 10, offset: 0 });
        let p = PageParams::normalize(Some(""), Some("2.5"));
        assert_eq!((p.page, p.limit), (1, 10));
    }

    #[test]
    fn total_pages_rounds_up() {
        let params = PageParams::normalize(Some("1"), Some("10"));
        assert_eq!(Pagination::new(params, 0).total_pages, 0);
        assert_eq!(Pagination::new(params, 1).total_pages, 1);
        assert_eq!(Pagination::new(params, 10).total_pages, 1);
        assert_eq!(Pagination::new(params, 11).total_pages, 2);
        assert_eq!(Pagination::new(params, 95).total_pages, 10);
    }

    #[test]
    fn page_size_is_never_zero() {
        for raw in [None, Some("0"), Some("-1"), Some("x"), Some("1"), Some("1000")] {
            let params = PageParams::normalize(None, raw);
            assert!(params.limit() >= 1, "{raw:?}");
            assert_eq!(Pagination::new(params, 7).page_size, params.limit());
        }
    }

    #[test]
    fn empty_page_serializes_as_empty_array() {
        let params = PageParams::default();
        let body = Paginated::<String>::from_page(Page { items: vec![], total: 0 }, params);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(
            json["pagination"],
            serde_json::json!({
                "currentPage": 1,
                "pageSize": 10,
                "totalItems": 0,
                "totalPages": 0
            })
        );
    }

    #[test]
    fn query_struct_feeds_normalizer() {
        let q = PageQuery {
            page: Some("3".into()),
            limit: Some("500".into()),
        };
        let p = PageParams::from(&q);
        assert_eq!(p, PageParams { page: 3, limit: 100, offset: 200 });
    }
}
