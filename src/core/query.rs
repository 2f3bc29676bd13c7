//! Query parameters, parsing and pagination utilities
//!
//! Every list/report endpoint receives the same loose bag of string
//! parameters. [`ReportQuery::into_params`] is the single validation step that
//! turns that bag into typed [`ListParams`]. Optional filters that fail to
//! parse are dropped rather than rejected.

use super::filter::{OrderFilter, RegionFilter, SearchFilter};
use serde::{Deserialize, Serialize};

/// Default page number
pub const DEFAULT_PAGE: usize = 1;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Raw query parameters, exactly as received on the query string
///
/// # Example
/// ```text
/// GET /customers?page=2&pageSize=10&search=ali&region=Europe&month=0
/// GET /orders?status=1&sortKey=date&sortDir=asc
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportQuery {
    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Number of items per page
    pub page_size: Option<String>,

    /// Free-text search
    pub search: Option<String>,

    /// Field to sort by
    pub sort_key: Option<String>,

    /// `asc` or `desc` (default)
    pub sort_dir: Option<String>,

    /// Order status code (0, 1, 2)
    pub status: Option<String>,

    /// Exact region name
    pub region: Option<String>,

    /// Month index as sent by the UI (0 = January)
    pub month: Option<String>,
}

impl ReportQuery {
    /// Validate the raw bag into typed parameters
    ///
    /// `default_sort_key` is used when no `sortKey` is supplied.
    pub fn into_params(self, default_sort_key: &str) -> ListParams {
        let filter = OrderFilter {
            search: self.search.as_deref().and_then(parse_search),
            region: self.region.as_deref().and_then(parse_region),
            month: self.month.as_deref().and_then(parse_month),
            status: self.status.as_deref().and_then(parse_status),
            ..OrderFilter::default()
        };

        let page = PageRequest::new(
            self.page
                .as_deref()
                .and_then(parse_integer)
                .map_or(DEFAULT_PAGE, clamp_positive),
            self.page_size
                .as_deref()
                .and_then(parse_integer)
                .map_or(DEFAULT_PAGE_SIZE, clamp_positive),
        );

        let sort = SortSpec {
            key: self
                .sort_key
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| default_sort_key.to_string()),
            direction: self
                .sort_dir
                .as_deref()
                .map(SortDirection::parse)
                .unwrap_or_default(),
        };

        ListParams { filter, page, sort }
    }
}

/// Validated parameters for list endpoints
#[derive(Debug, Clone)]
pub struct ListParams {
    pub filter: OrderFilter,
    pub page: PageRequest,
    pub sort: SortSpec,
}

// =============================================================================
// Per-parameter parse steps
// =============================================================================

/// Parse a number permissively
///
/// Blank input and anything that is not a finite number yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse an integral number (`"3"` and `"3.0"` are accepted, `"3.5"` is not)
pub fn parse_integer(raw: &str) -> Option<i64> {
    parse_number(raw)
        .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
        .map(|n| n as i64)
}

/// Search filter: blank text means no search
pub fn parse_search(raw: &str) -> Option<SearchFilter> {
    SearchFilter::parse(raw)
}

/// Region filter: exact match; a value outside the fixed set matches nothing
pub fn parse_region(raw: &str) -> Option<RegionFilter> {
    RegionFilter::parse(raw)
}

/// Month filter: the UI sends 0 for January, stored months are 1-indexed
pub fn parse_month(raw: &str) -> Option<i64> {
    parse_integer(raw).map(|month| month + 1)
}

/// Status filter: numeric status code
pub fn parse_status(raw: &str) -> Option<i64> {
    parse_integer(raw)
}

fn clamp_positive(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0).max(1)
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort direction, descending unless `asc` is requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Self {
        if raw == "asc" {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

/// Requested sort field (still a string; each endpoint resolves its own keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Resolve the key against an endpoint's field set
    ///
    /// Unknown keys resolve to `None`, which sorting treats as a no-op.
    pub fn resolve<K: std::str::FromStr>(&self) -> Option<K> {
        self.key.parse().ok()
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// A 1-indexed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Number of items skipped before this page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Paginated response structure
///
/// `total` counts every item that survived filtering, before pagination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// The requested page
    pub data: Vec<T>,

    /// Total number of items (after filters)
    pub total: usize,

    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: usize, page: PageRequest) -> Self {
        Self {
            data,
            total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}
