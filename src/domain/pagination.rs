//! Page/page-size normalization and paginated envelopes.
//!
//! Inputs arrive as raw query-string values. Anything that does not parse as
//! a positive integer falls back to the default instead of producing a client
//! error.

use serde::Serialize;

/// Page used when the request omits or garbles `page`.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the request omits or garbles `page_size`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A normalized pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request from already-validated values.
    ///
    /// Zero values are replaced by the defaults, matching [`Self::from_raw`].
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// Parse user-supplied `page` / `page_size` strings.
    #[must_use]
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self::new(
            parse_positive(page).unwrap_or(DEFAULT_PAGE),
            parse_positive(page_size).unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Row offset of the first item on this page: `(page - 1) * page_size`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        let offset = u64::from(self.page - 1) * u64::from(self.page_size);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    /// SQL `LIMIT` value for this page.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// Number of pages needed to show `total_count` rows.
    #[must_use]
    pub fn total_pages(&self, total_count: i64) -> i64 {
        total_pages(total_count, self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// `ceil(total_count / page_size)`; zero rows means zero pages.
#[must_use]
pub fn total_pages(total_count: i64, page_size: u32) -> i64 {
    if total_count <= 0 || page_size == 0 {
        return 0;
    }
    let size = i64::from(page_size);
    let pages = total_count / size;
    if total_count % size == 0 {
        pages
    } else {
        pages + 1
    }
}

/// Row cap for the unpaginated feeds (market signals, quotas).
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Parse a `limit` query value, falling back to [`DEFAULT_LIST_LIMIT`].
#[must_use]
pub fn list_limit(raw: Option<&str>) -> i64 {
    i64::from(parse_positive(raw).unwrap_or(DEFAULT_LIST_LIMIT))
}

/// Parse a trimmed positive integer; zero, negatives and junk yield `None`.
fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
}

/// Paginated response envelope shared by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Wrap one page of rows with the metadata derived from `request`.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total_count: i64) -> Self {
        Self {
            data,
            page: request.page(),
            page_size: request.page_size(),
            total_count,
            total_pages: request.total_pages(total_count),
        }
    }
}
