use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChapterGroup, ChapterRef};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

/// A comic as it appears in a listing, normalized from the catalog payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComicSummary {
    pub slug: String,
    pub name: String,
    pub thumbnail_path: String,
    pub updated_at: DateTime<Utc>,
    pub latest_chapter_label: Option<String>,
    pub categories: Vec<Category>,
}

impl ComicSummary {
    pub fn thumbnail_url(&self, cdn_base: &str) -> String {
        thumbnail_url(cdn_base, &self.thumbnail_path)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComicDetail {
    pub slug: String,
    pub name: String,
    pub thumbnail_path: String,
    pub categories: Vec<Category>,
    pub chapter_groups: Vec<ChapterGroup>,
    pub status: Option<String>,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ComicDetail {
    pub fn thumbnail_url(&self, cdn_base: &str) -> String {
        thumbnail_url(cdn_base, &self.thumbnail_path)
    }

    pub fn chapter_count(&self) -> usize {
        self.chapter_groups.iter().map(|g| g.chapters.len()).sum()
    }

    /// Look up a chapter by its display name, optionally restricted to one
    /// source group. Groups are searched in order, first match wins.
    pub fn find_chapter(&self, display_name: &str, source_label: Option<&str>) -> Option<&ChapterRef> {
        self.chapter_groups
            .iter()
            .filter(|group| source_label.is_none_or(|label| group.source_label == label))
            .flat_map(|group| group.chapters.iter())
            .find(|chapter| chapter.display_name == display_name)
    }
}

pub fn thumbnail_url(cdn_base: &str, thumbnail_path: &str) -> String {
    format!(
        "{}/uploads/comics/{}",
        cdn_base.trim_end_matches('/'),
        thumbnail_path
    )
}
