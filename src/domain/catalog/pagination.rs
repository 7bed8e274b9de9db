// src/domain/catalog/pagination.rs
//
// Fixed-size pagination over the filtered view.
//
// Pages are 1-based. Next/Previous past a boundary leave the page unchanged.

use serde::{Deserialize, Serialize};

/// Items per catalog page
pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    current_page: usize,
    total_items: usize,
    page_size: usize,
}

/// Prev/next state for the pagination control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationControl {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub label: String,
}

impl Paginator {
    pub fn new(total_items: usize) -> Self {
        Self::with_page_size(total_items, PAGE_SIZE)
    }

    pub fn with_page_size(total_items: usize, page_size: usize) -> Self {
        Self {
            current_page: 1,
            total_items,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// ceil(total_items / page_size)
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Back to page 1 with a new item count
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = 1;
    }

    /// Returns true if the page moved
    pub fn next(&mut self) -> bool {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the page moved
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Half-open index range of the current page, clamped to the item count
    pub fn window(&self) -> std::ops::Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.window();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// `None` when there is at most one page: the control is not rendered at all
    pub fn control(&self) -> Option<PaginationControl> {
        let total_pages = self.total_pages();
        if total_pages <= 1 {
            return None;
        }
        Some(PaginationControl {
            current_page: self.current_page,
            total_pages,
            has_previous: self.current_page > 1,
            has_next: self.current_page < total_pages,
            label: format!("Page {} of {}", self.current_page, total_pages),
        })
    }
}
