//! Fixed-size pages with clamped page numbers.
//!
//! `total_pages = max(1, ceil(len / page_size))` and any requested page,
//! negative or past the end included, is clamped into `[1, total_pages]`.
//! An empty input yields one empty page.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Page size used when a view does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a table view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, always within `[1, total_pages]`.
    pub current_page: usize,
    pub total_pages: usize,
    /// Length of the sequence that was paginated.
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Convert the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            page_size: self.page_size,
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Number of pages needed for `len` items.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    let size = effective_size(page_size);
    let pages = len.div_ceil(size);
    if pages == 0 { 1 } else { pages }
}

/// Clamp a requested page into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = total_pages.max(1);
    usize::try_from(requested).map_or(1, |page| page.clamp(1, last))
}

const fn effective_size(page_size: usize) -> usize {
    if page_size == 0 { 1 } else { page_size }
}

/// Slice `records` into the requested page.
#[must_use]
pub fn paginate<T: Clone>(records: &[T], page: i64, page_size: usize) -> Page<T> {
    let size = effective_size(page_size);
    let total = total_pages(records.len(), size);
    let current = clamp_page(page, total);

    let start = (current - 1) * size;
    let end = (start + size).min(records.len());
    let items = records.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        current_page: current,
        total_pages: total,
        total_items: records.len(),
        page_size: size,
    }
}

/// Paging state stored per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PageState {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "first_page")]
    pub current_page: usize,
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn first_page() -> usize {
    1
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            current_page: first_page(),
        }
    }
}

impl PageState {
    #[must_use]
    pub const fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: effective_size(page_size),
            current_page: 1,
        }
    }

    /// Clamp the stored page against a new upstream length. Returns `true`
    /// when the page moved.
    pub fn reclamp(&mut self, len: usize) -> bool {
        let total = total_pages(len, self.page_size);
        let clamped = self.current_page.clamp(1, total);
        let moved = clamped != self.current_page;
        self.current_page = clamped;
        moved
    }

    /// Request a page, clamped against `len`.
    pub fn go_to(&mut self, page: i64, len: usize) {
        self.current_page = clamp_page(page, total_pages(len, self.page_size));
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}
