use serde::{Deserialize, Serialize};

use super::ComicSummary;
use crate::pagination;

/// Slug of the new-release listing on the catalog
pub const NEW_RELEASES_SLUG: &str = "truyen-moi";

/// Publication status listings offered next to the genre menu, as `(slug, label)`
pub const STATUS_SCOPES: [(&str, &str); 3] = [
    ("dang-phat-hanh", "Đang phát hành"),
    ("hoan-thanh", "Hoàn thành"),
    ("sap-ra-mat", "Sắp ra mắt"),
];

/// The key a listing is fetched by. Every field takes part in equality, so
/// changing any of them is a different query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ListingQuery {
    pub page: u32,
    pub keyword: Option<String>,
    pub scope: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ListingQuery {
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            keyword: None,
            scope: None,
        }
    }

    pub fn scoped(scope: impl Into<String>, page: u32) -> Self {
        Self {
            scope: Some(scope.into()),
            ..Self::new(page)
        }
    }

    /// Blank keywords are not searchable, `None` is returned for them.
    pub fn search(keyword: &str, page: u32) -> Option<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return None;
        }

        Some(Self {
            keyword: Some(keyword.to_string()),
            ..Self::new(page)
        })
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}

/// One page of a listing, as returned by the catalog
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ListingResult {
    pub items: Vec<ComicSummary>,
    pub total_items: u64,
}

impl ListingResult {
    pub fn total_pages(&self, items_per_page: u32) -> u32 {
        pagination::total_pages(self.total_items, items_per_page)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
