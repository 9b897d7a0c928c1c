//! Catalog query-builder helpers: filter normalization, pagination math,
//! and tsquery construction for full-text search.
//!
//! This module owns the ordering and paging contracts; the repository layer
//! only translates a normalized [`CatalogFilter`] into SQL.

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A normalized catalog filter request.
///
/// `page` and `limit` are always in valid ranges after construction, and
/// `tsquery` holds a ready-to-bind PostgreSQL tsquery string (or `None` when
/// no usable search term was supplied).
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub page: i64,
    pub limit: i64,
    pub tsquery: Option<String>,
    pub language: Option<String>,
    pub tag: Option<String>,
    pub curated_only: bool,
}

impl CatalogFilter {
    /// Normalize raw query parameters into a filter.
    pub fn from_params(
        page: Option<i64>,
        limit: Option<i64>,
        search: Option<&str>,
        language: Option<String>,
        tag: Option<String>,
        curated_only: bool,
    ) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit),
            tsquery: search.and_then(build_tsquery),
            language: language.filter(|l| !l.trim().is_empty()),
            tag: tag.filter(|t| !t.trim().is_empty()),
            curated_only,
        }
    }

    /// Row offset for the current page: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Clamp a user-provided page number to `>= 1`.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// Clamp a user-provided page size to `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1).min(MAX_PAGE_LIMIT)
}

/// Total number of pages for `total` rows at `limit` rows per page.
///
/// An empty result set yields zero pages; this is a valid, non-error outcome.
pub fn page_count(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Sanitize user input into a list of terms suitable for tsquery construction.
///
/// - Splits on any character that is not alphanumeric or `_`, so interior
///   tsquery operators (`:`, `&`, `!`, quotes) can never reach the store and
///   raise a tsquery syntax error.
/// - Drops empty terms.
fn sanitize_terms(query: &str) -> Option<Vec<&str>> {
    let terms: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

/// Sanitize and convert a search term into a PostgreSQL `tsquery` string.
///
/// Whitespace-separated terms are joined with `&` (AND). Empty or
/// unparseable input returns `None`, which the caller treats as "no search".
///
/// # Examples
///
/// ```
/// use scripthub_core::catalog::build_tsquery;
/// assert_eq!(build_tsquery("backup rotate"), Some("backup & rotate".to_string()));
/// assert_eq!(build_tsquery("  "), None);
/// ```
pub fn build_tsquery(query: &str) -> Option<String> {
    sanitize_terms(query).map(|terms| terms.join(" & "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
