//! Fixed-size pagination over the filtered contract list

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages for `count` items, never less than 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Items on 1-based `page`; empty when the page is out of range
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Current page of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Move to page `n`; ignored outside `1..=total_pages`
    ///
    /// Returns whether the page changed.
    pub fn go_to(&mut self, n: usize, total_pages: usize) -> bool {
        if n < 1 || n > total_pages || n == self.current {
            return false;
        }
        self.current = n;
        true
    }

    /// Pull the current page back into `1..=max(1, total_pages)`
    pub fn clamp(&mut self, total_pages: usize) {
        self.current = self.current.clamp(1, total_pages.max(1));
    }
}

/// Numbers behind the "Showing X to Y of Z results" footer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Pagination controls are hidden for a single page
    pub show_controls: bool,
}

impl PageSummary {
    pub fn new(state: &PageState, total_items: usize) -> Self {
        let pages = total_pages(total_items, state.page_size);
        let current = state.current;
        let first = (current - 1).saturating_mul(state.page_size);
        let (start_item, end_item) = if first < total_items {
            (
                first + 1,
                current.saturating_mul(state.page_size).min(total_items),
            )
        } else {
            (0, 0)
        };
        Self {
            current_page: current,
            total_pages: pages,
            total_items,
            start_item,
            end_item,
            has_previous: current > 1,
            has_next: current < pages,
            show_controls: pages > 1,
        }
    }
}
