use serde::{Deserialize, Serialize};

/// Chapters served by one content source
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChapterGroup {
    pub source_label: String,
    pub chapters: Vec<ChapterRef>,
}

/// `content_endpoint` is an absolute URL handed out by the detail payload,
/// it is fetched as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ChapterRef {
    pub display_name: String,
    pub content_endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChapterContent {
    pub chapter_name: String,
    pub comic_name: String,
    pub cdn_base: String,
    pub path_segment: String,
    pub image_files: Vec<String>,
}

impl ChapterContent {
    pub fn title(&self) -> String {
        format!("{} - {}", self.chapter_name, self.comic_name)
    }

    /// Page image URLs in reading order
    pub fn page_urls(&self) -> Vec<String> {
        let base = self.cdn_base.trim_end_matches('/');
        let path = self.path_segment.trim_matches('/');
        self.image_files
            .iter()
            .map(|file| format!("{base}/{path}/{file}"))
            .collect()
    }
}
