use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use otruyen_lib::models::{
    Category, ChapterContent, ChapterGroup, ChapterRef, ComicDetail, ComicSummary, ListingResult,
};

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ComicItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: ListingParams,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    #[serde(default, rename = "totalItems", deserialize_with = "null_as_default")]
    pub total_items: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryItem {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestChapter {
    pub chapter_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ComicItem {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub thumb_url: String,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "chaptersLatest")]
    pub chapters_latest: Option<Vec<LatestChapter>>,
    #[serde(default)]
    pub category: Option<Vec<CategoryItem>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryIndexData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CategoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct ComicDetailData {
    pub item: ComicDetailItem,
}

#[derive(Debug, Deserialize)]
pub struct ComicDetailItem {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub thumb_url: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub author: Option<Vec<String>>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<Vec<CategoryItem>>,
    #[serde(default)]
    pub chapters: Option<Vec<ChapterServer>>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterServer {
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub server_data: Vec<ServerChapter>,
}

#[derive(Debug, Deserialize)]
pub struct ServerChapter {
    pub chapter_name: String,
    pub chapter_api_data: String,
}

#[derive(Debug, Deserialize)]
pub struct ChapterData {
    pub domain_cdn: String,
    pub item: ChapterItem,
}

#[derive(Debug, Deserialize)]
pub struct ChapterItem {
    #[serde(default)]
    pub chapter_name: String,
    #[serde(default)]
    pub comic_name: String,
    pub chapter_path: String,
    #[serde(default)]
    pub chapter_image: Vec<ChapterImage>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterImage {
    pub image_file: String,
}

impl From<CategoryItem> for Category {
    fn from(c: CategoryItem) -> Self {
        Self {
            slug: c.slug,
            name: c.name,
        }
    }
}

fn into_categories(items: Option<Vec<CategoryItem>>) -> Vec<Category> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(Category::from)
        .collect()
}

impl From<ComicItem> for ComicSummary {
    fn from(item: ComicItem) -> Self {
        let latest_chapter_label = item
            .chapters_latest
            .and_then(|chapters| chapters.into_iter().next())
            .map(|chapter| chapter.chapter_name);

        Self {
            slug: item.slug,
            name: item.name,
            thumbnail_path: item.thumb_url,
            updated_at: item.updated_at.unwrap_or_default(),
            latest_chapter_label,
            categories: into_categories(item.category),
        }
    }
}

impl From<ListingData> for ListingResult {
    fn from(data: ListingData) -> Self {
        Self {
            items: data.items.into_iter().map(ComicSummary::from).collect(),
            total_items: data.params.pagination.total_items,
        }
    }
}

impl From<CategoryIndexData> for Vec<Category> {
    fn from(data: CategoryIndexData) -> Self {
        data.items.into_iter().map(Category::from).collect()
    }
}

impl From<ChapterServer> for ChapterGroup {
    fn from(server: ChapterServer) -> Self {
        Self {
            source_label: server.server_name,
            chapters: server
                .server_data
                .into_iter()
                .map(|chapter| ChapterRef {
                    display_name: chapter.chapter_name,
                    content_endpoint: chapter.chapter_api_data,
                })
                .collect(),
        }
    }
}

impl From<ComicDetailData> for ComicDetail {
    fn from(data: ComicDetailData) -> Self {
        let item = data.item;
        Self {
            slug: item.slug,
            name: item.name,
            thumbnail_path: item.thumb_url,
            categories: into_categories(item.category),
            chapter_groups: item
                .chapters
                .unwrap_or_default()
                .into_iter()
                .map(ChapterGroup::from)
                .collect(),
            status: item.status,
            authors: item.author.unwrap_or_default(),
            description: item.content.filter(|content| !content.trim().is_empty()),
            updated_at: item.updated_at,
        }
    }
}

impl From<ChapterData> for ChapterContent {
    fn from(data: ChapterData) -> Self {
        Self {
            chapter_name: data.item.chapter_name,
            comic_name: data.item.comic_name,
            cdn_base: data.domain_cdn,
            path_segment: data.item.chapter_path,
            image_files: data
                .item
                .chapter_image
                .into_iter()
                .map(|image| image.image_file)
                .collect(),
        }
    }
}
