use std::rc::Rc;

use otruyen_lib::{models::ComicDetail, traits::Catalog};
use serde::Serialize;

use crate::{
    fetch::{DataFetchController, Phase},
    listing::ViewPhase,
    modal::ChapterModalController,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub phase: ViewPhase,
    pub detail: Option<Rc<ComicDetail>>,
    pub thumbnail_url: Option<String>,
}

/// Comic page: the detail fetch keyed by slug, plus its own chapter reader
pub struct DetailViewModel {
    controller: DataFetchController<String, ComicDetail>,
    chapter: ChapterModalController,
    image_base_url: String,
}

impl DetailViewModel {
    pub fn new(catalog: Rc<dyn Catalog>, image_base_url: impl Into<String>) -> Rc<Self> {
        let chapter = ChapterModalController::for_catalog(catalog.clone());
        let controller = DataFetchController::new(move |slug: String| {
            let catalog = catalog.clone();
            async move { catalog.comic_detail(&slug).await }
        });

        Rc::new(Self {
            controller,
            chapter,
            image_base_url: image_base_url.into(),
        })
    }

    pub fn open(&self, slug: &str) -> Phase<ComicDetail> {
        self.controller.observe(slug.to_string())
    }

    pub fn chapter(&self) -> &ChapterModalController {
        &self.chapter
    }

    pub fn view(&self) -> DetailView {
        self.compose(self.controller.phase())
    }

    pub async fn settled(&self) -> DetailView {
        let phase = self.controller.settled().await;
        self.compose(phase)
    }

    fn compose(&self, phase: Phase<ComicDetail>) -> DetailView {
        match phase {
            Phase::Idle => DetailView {
                phase: ViewPhase::Idle,
                detail: None,
                thumbnail_url: None,
            },
            Phase::Loading => DetailView {
                phase: ViewPhase::Loading,
                detail: None,
                thumbnail_url: None,
            },
            Phase::Success(detail) => DetailView {
                phase: ViewPhase::Loaded,
                thumbnail_url: (!detail.thumbnail_path.is_empty())
                    .then(|| detail.thumbnail_url(&self.image_base_url)),
                detail: Some(detail),
            },
            Phase::Error(message) => DetailView {
                phase: ViewPhase::Error(message),
                detail: None,
                thumbnail_url: None,
            },
        }
    }
}
