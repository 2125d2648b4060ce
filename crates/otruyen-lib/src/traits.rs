use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Category, ChapterContent, ChapterRef, ComicDetail, ListingResult};

/// Read-only access to the remote comics catalog.
///
/// Futures are not required to be `Send`, everything runs on one thread.
#[async_trait(?Send)]
pub trait Catalog {
    async fn new_releases(&self, page: u32) -> Result<ListingResult>;

    /// Listing by publication status, e.g. `hoan-thanh`
    async fn status_listing(&self, status_slug: &str, page: u32) -> Result<ListingResult>;

    async fn category_listing(&self, category_slug: &str, page: u32) -> Result<ListingResult>;

    async fn search(&self, keyword: &str, page: u32) -> Result<ListingResult>;

    async fn categories(&self) -> Result<Vec<Category>>;

    async fn comic_detail(&self, slug: &str) -> Result<ComicDetail>;

    async fn chapter_content(&self, chapter: &ChapterRef) -> Result<ChapterContent>;
}
