//! Page-based pagination for list endpoints.
//!
//! List endpoints accept `{page, limit, search?}` plus endpoint-specific
//! enum filters, and return a [`ListPage`] of `{items, total, pages,
//! current_page}`. `pages` is always recomputed as `ceil(total / limit)`,
//! never stored; `current_page` echoes the validated request even when it
//! exceeds `pages`, in which case `items` is simply empty.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Maximum number of items a single page may return.
pub const MAX_LIMIT: i64 = 100;

/// Default page size when the client does not specify one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters shared by every paginated list endpoint.
///
/// Endpoint-specific filters (ticket status, priority, ...) live in the
/// endpoint's own params struct and `#[serde(flatten)]` this one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Free-text search, matched case-insensitively against a fixed set of
    /// text columns with OR semantics
    pub search: Option<String>,
}

impl ListParams {
    /// Effective page, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// Search text, with empty strings treated as absent.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Total matching rows across all pages
    pub total: i64,
    /// `ceil(total / limit)`; 0 when nothing matches
    pub pages: i64,
    /// The page that was requested, even if past the last page
    pub current_page: i64,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>, total: i64, params: &ListParams) -> Self {
        Self {
            items,
            total,
            pages: page_count(total, params.limit()),
            current_page: params.page(),
        }
    }
}

/// `ceil(total / limit)` without going through floats.
///
/// An empty result set has zero pages, not one.
#[must_use]
pub fn page_count(total: i64, limit: i64) -> i64 {
    debug_assert!(limit >= 1);
    (total + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, limit: Option<i64>) -> ListParams {
        ListParams {
            page,
            limit,
            search: None,
        }
    }

    #[test]
    fn test_defaults() {
        let p = ListParams::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_page_clamped_to_one() {
        assert_eq!(params(Some(0), None).page(), 1);
        assert_eq!(params(Some(-5), None).page(), 1);
        assert_eq!(params(Some(7), None).page(), 7);
    }

    #[test]
    fn test_limit_clamped() {
        assert_eq!(params(None, Some(0)).limit(), 1);
        assert_eq!(params(None, Some(-10)).limit(), 1);
        assert_eq!(params(None, Some(100)).limit(), 100);
        assert_eq!(params(None, Some(250)).limit(), 100);
        assert_eq!(params(None, Some(25)).limit(), 25);
    }

    #[test]
    fn test_offset_from_page() {
        assert_eq!(params(Some(1), Some(10)).offset(), 0);
        assert_eq!(params(Some(3), Some(10)).offset(), 20);
        assert_eq!(params(Some(2), Some(25)).offset(), 25);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(100, 100), 1);
    }

    #[test]
    fn test_list_page_scenario() {
        // page=1, limit=10, total=25 -> pages=3, current_page=1
        let p = params(Some(1), Some(10));
        let page = ListPage::new(vec![0u8; 10], 25, &p);
        assert_eq!(page.pages, 3);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn test_list_page_past_end_echoes_request() {
        let p = params(Some(9), Some(10));
        let page: ListPage<u8> = ListPage::new(vec![], 25, &p);
        assert!(page.items.is_empty());
        assert_eq!(page.pages, 3);
        assert_eq!(page.current_page, 9);
    }

    #[test]
    fn test_list_page_empty_result() {
        let p = params(Some(1), Some(10));
        let page: ListPage<u8> = ListPage::new(vec![], 0, &p);
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn test_search_empty_string_is_none() {
        let p = ListParams {
            page: None,
            limit: None,
            search: Some(String::new()),
        };
        assert_eq!(p.search(), None);

        let p = ListParams {
            page: None,
            limit: None,
            search: Some("urgent".to_string()),
        };
        assert_eq!(p.search(), Some("urgent"));
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let p: ListParams = serde_json::from_str(r#"{"page":"","limit":""}"#).unwrap();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn test_deserialize_string_numbers() {
        let p: ListParams = serde_json::from_str(r#"{"page":"3","limit":"20"}"#).unwrap();
        assert_eq!(p.page(), 3);
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 40);
    }
}
