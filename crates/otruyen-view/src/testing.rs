use std::{cell::RefCell, rc::Rc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::{
    channel::oneshot,
    future::{FutureExt, LocalBoxFuture},
};
use otruyen_lib::prelude::*;

type Slot<Q, T> = (Q, Option<oneshot::Sender<Result<T>>>);

/// Fetch capability whose responses are released by the test, in any order.
pub struct Pending<Q, T> {
    requests: Rc<RefCell<Vec<Slot<Q, T>>>>,
}

impl<Q: Clone + 'static, T: 'static> Pending<Q, T> {
    pub fn new() -> Self {
        Self {
            requests: Rc::new(RefCell::new(vec![])),
        }
    }

    pub fn fetch(&self) -> impl Fn(Q) -> LocalBoxFuture<'static, Result<T>> + 'static {
        let requests = self.requests.clone();
        move |key| {
            let (tx, rx) = oneshot::channel();
            requests.borrow_mut().push((key, Some(tx)));
            async move {
                rx.await
                    .unwrap_or_else(|_| Err(Error::Transport("request dropped".to_string())))
            }
            .boxed_local()
        }
    }

    pub fn issued(&self) -> Vec<Q> {
        self.requests
            .borrow()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn respond(&self, index: usize, result: Result<T>) {
        let tx = self.requests.borrow_mut()[index]
            .1
            .take()
            .expect("request already answered");
        let _ = tx.send(result);
    }
}

pub fn timestamp(days_ago: i64) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
        - Duration::days(days_ago)
}

pub fn comic(slug: &str, updated_at: DateTime<Utc>) -> ComicSummary {
    ComicSummary {
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        thumbnail_path: format!("{slug}-thumb.jpg"),
        updated_at,
        latest_chapter_label: Some("1".to_string()),
        categories: vec![],
    }
}

/// `count` items whose update times are deliberately out of order
pub fn listing(count: usize, total_items: u64) -> ListingResult {
    ListingResult {
        items: (0..count)
            .map(|i| comic(&format!("comic-{i}"), timestamp(((i * 7) % 11) as i64)))
            .collect(),
        total_items,
    }
}

pub fn chapter_ref(name: &str) -> ChapterRef {
    ChapterRef {
        display_name: name.to_string(),
        content_endpoint: format!("https://sv1.otruyencdn.com/v1/api/chapter/{name}"),
    }
}

pub fn chapter_content(name: &str) -> ChapterContent {
    ChapterContent {
        chapter_name: name.to_string(),
        comic_name: "Dragon Ball".to_string(),
        cdn_base: "https://sv1.otruyencdn.com".to_string(),
        path_segment: format!("uploads/chapter_{name}"),
        image_files: vec!["page_1.jpg".to_string(), "page_2.jpg".to_string()],
    }
}

/// Catalog answering immediately from canned data and recording every call
#[derive(Default)]
pub struct FakeCatalog {
    pub calls: RefCell<Vec<String>>,
    pub listing: ListingResult,
    pub detail: Option<ComicDetail>,
    pub failing_chapters: bool,
}

impl FakeCatalog {
    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl Catalog for FakeCatalog {
    async fn new_releases(&self, page: u32) -> Result<ListingResult> {
        self.record(format!("new_releases {page}"));
        Ok(self.listing.clone())
    }

    async fn status_listing(&self, status_slug: &str, page: u32) -> Result<ListingResult> {
        self.record(format!("status_listing {status_slug} {page}"));
        Ok(self.listing.clone())
    }

    async fn category_listing(&self, category_slug: &str, page: u32) -> Result<ListingResult> {
        self.record(format!("category_listing {category_slug} {page}"));
        Ok(self.listing.clone())
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<ListingResult> {
        self.record(format!("search {keyword} {page}"));
        Ok(self.listing.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        self.record("categories".to_string());
        Ok(vec![])
    }

    async fn comic_detail(&self, slug: &str) -> Result<ComicDetail> {
        self.record(format!("comic_detail {slug}"));
        self.detail.clone().ok_or_else(|| Error::Status {
            status: 404,
            url: format!("https://otruyenapi.com/v1/api/truyen-tranh/{slug}"),
        })
    }

    async fn chapter_content(&self, chapter: &ChapterRef) -> Result<ChapterContent> {
        self.record(format!("chapter_content {}", chapter.display_name));
        if self.failing_chapters {
            return Err(Error::Transport("connection refused".to_string()));
        }
        Ok(chapter_content(&chapter.display_name))
    }
}
