//! Filtering and pagination of table names.
//!
//! Everything here is pure: the same table list and request always produce
//! the same page.

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Upper bound on `page_size`; larger requests are clamped.
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Normalized paging parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    pub page_size: u64,
    /// Case-insensitive substring filter, never empty
    pub filter: Option<String>,
}

impl PageRequest {
    /// Build a request from raw caller input.
    ///
    /// `page < 1` becomes 1, `page_size < 1` becomes 20, `page_size` above
    /// [`MAX_PAGE_SIZE`] is clamped, and an empty filter means no filter.
    pub fn new(page: i64, page_size: i64, filter: Option<String>) -> Self {
        let page = u64::try_from(page)
            .ok()
            .filter(|&p| p >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let page_size = u64::try_from(page_size)
            .ok()
            .filter(|&s| s >= 1)
            .map_or(DEFAULT_PAGE_SIZE, |s| s.min(MAX_PAGE_SIZE));

        Self {
            page,
            page_size,
            filter: filter.filter(|f| !f.is_empty()),
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            filter: None,
        }
    }
}

/// True if `name` contains `filter`, ignoring case.
pub fn matches_filter(name: &str, filter: &str) -> bool {
    name.to_lowercase().contains(&filter.to_lowercase())
}

/// Keep the tables matching `filter`, preserving order.
pub fn filter_tables(tables: Vec<String>, filter: Option<&str>) -> Vec<String> {
    match filter {
        Some(filter) => tables
            .into_iter()
            .filter(|name| matches_filter(name, filter))
            .collect(),
        None => tables,
    }
}

/// Number of pages needed for `total` items; 0 when there are none.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The slice of `items` on the requested page. Pages past the end are empty.
pub fn page_slice<'a, T>(items: &'a [T], request: &PageRequest) -> &'a [T] {
    let start = usize::try_from(request.offset())
        .unwrap_or(usize::MAX)
        .min(items.len());
    let len = usize::try_from(request.page_size).unwrap_or(usize::MAX);
    let end = start.saturating_add(len).min(items.len());
    &items[start..end]
}

/// Summary line shown to callers.
pub fn page_message(page: u64, total_pages: u64, total_tables: u64) -> String {
    format!("第 {} / {} 页，共 {} 个表", page, total_pages, total_tables)
}
