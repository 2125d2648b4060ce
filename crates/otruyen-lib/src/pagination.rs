use serde::{Deserialize, Serialize};

/// Page numbers shown as pagination controls.
///
/// `pages` is contiguous, strictly increasing and within `1..=total_pages`.
/// It holds `min(window_size, total_pages)` entries and contains the current
/// page whenever there is at least one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationWindow {
    pub pages: Vec<u32>,
    pub window_size: u32,
}

impl PaginationWindow {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn first(&self) -> Option<u32> {
        self.pages.first().copied()
    }

    pub fn last(&self) -> Option<u32> {
        self.pages.last().copied()
    }

    pub fn contains(&self, page: u32) -> bool {
        self.first().is_some_and(|first| page >= first) && self.last().is_some_and(|last| page <= last)
    }
}

pub fn total_pages(total_items: u64, items_per_page: u32) -> u32 {
    if items_per_page == 0 {
        return 0;
    }

    total_items
        .div_ceil(items_per_page as u64)
        .try_into()
        .unwrap_or(u32::MAX)
}

/// Clamp a requested page into `1..=total_pages`. With no pages known the
/// first page is the only valid target.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Compute the visible window centered on `current_page`, pinned to either
/// edge when the center would run out of range.
pub fn window(current_page: u32, total_pages: u32, window_size: u32) -> PaginationWindow {
    if total_pages == 0 || window_size == 0 {
        return PaginationWindow {
            pages: vec![],
            window_size,
        };
    }

    let current = clamp_page(current_page, total_pages) as i64;
    let total = total_pages as i64;
    let size = window_size as i64;

    let start = (current - size / 2).min(total - size + 1).max(1);
    let len = size.min(total);
    let end = (start + len - 1).min(total);

    PaginationWindow {
        pages: (start..=end).map(|page| page as u32).collect(),
        window_size,
    }
}
