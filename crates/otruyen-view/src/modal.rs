use std::rc::Rc;

use futures_signals::signal::{Mutable, Signal};
use otruyen_lib::{
    error::Result,
    models::{ChapterContent, ChapterRef},
    traits::Catalog,
};

use crate::fetch::{DataFetchController, Phase, Settled};

#[derive(Debug, Clone, PartialEq)]
pub enum ModalPhase {
    Closed,
    Loading,
    Open(Rc<ChapterContent>),
    Error(String),
}

/// Chapter reader overlay.
///
/// Content is fetched on every activation. Dismissing only hides the overlay,
/// the last loaded chapter stays around and can be shown again with
/// [`ChapterModalController::reopen`].
pub struct ChapterModalController {
    controller: DataFetchController<ChapterRef, ChapterContent>,
    visible: Mutable<bool>,
}

impl ChapterModalController {
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(ChapterRef) -> Fut + 'static,
        Fut: Future<Output = Result<ChapterContent>> + 'static,
    {
        Self {
            controller: DataFetchController::new(fetch),
            visible: Mutable::new(false),
        }
    }

    pub fn for_catalog(catalog: Rc<dyn Catalog>) -> Self {
        Self::new(move |chapter: ChapterRef| {
            let catalog = catalog.clone();
            async move { catalog.chapter_content(&chapter).await }
        })
    }

    /// Fetch `chapter` in the background, showing the overlay once it loaded.
    pub fn activate(&self, chapter: ChapterRef) {
        tokio::task::spawn_local(self.load(chapter));
    }

    /// Like [`ChapterModalController::activate`] but hands the completion
    /// back to the caller.
    pub fn load(&self, chapter: ChapterRef) -> impl Future<Output = Settled> + 'static {
        info!("opening chapter {}", chapter.display_name);

        let request = self.controller.request(chapter);
        let visible = self.visible.clone();

        async move {
            let settled = request.await;
            if settled == Settled::Success {
                visible.set_neq(true);
            }

            settled
        }
    }

    pub fn dismiss(&self) {
        self.visible.set_neq(false);
    }

    /// Show the last loaded chapter again without fetching it
    pub fn reopen(&self) -> bool {
        let loaded = matches!(self.phase(), ModalPhase::Open(_));
        if loaded {
            self.visible.set_neq(true);
        }

        loaded
    }

    pub fn phase(&self) -> ModalPhase {
        match self.controller.phase() {
            Phase::Idle => ModalPhase::Closed,
            Phase::Loading => ModalPhase::Loading,
            Phase::Success(content) => ModalPhase::Open(content),
            Phase::Error(message) => ModalPhase::Error(message),
        }
    }

    pub fn chapter(&self) -> Option<ChapterRef> {
        self.controller.key()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn visible_signal(&self) -> impl Signal<Item = bool> + use<> {
        self.visible.signal()
    }

    pub async fn settled(&self) -> ModalPhase {
        self.controller.settled().await;
        self.phase()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{FakeCatalog, Pending, chapter_content, chapter_ref};
    use otruyen_lib::prelude::Error;
    use tokio::task::LocalSet;

    #[tokio::test]
    async fn test_activate_opens_on_success() {
        let pending = Pending::new();
        let modal = ChapterModalController::new(pending.fetch());
        assert_eq!(modal.phase(), ModalPhase::Closed);

        let load = modal.load(chapter_ref("1"));
        assert_eq!(modal.phase(), ModalPhase::Loading);
        assert!(!modal.is_visible());

        pending.respond(0, Ok(chapter_content("1")));
        assert_eq!(load.await, Settled::Success);
        assert_eq!(modal.phase(), ModalPhase::Open(Rc::new(chapter_content("1"))));
        assert!(modal.is_visible());
    }

    #[tokio::test]
    async fn test_failure_keeps_visibility() {
        let pending = Pending::new();
        let modal = ChapterModalController::new(pending.fetch());

        let load = modal.load(chapter_ref("1"));
        pending.respond(0, Err(Error::Transport("connection refused".to_string())));
        assert_eq!(load.await, Settled::Failure);
        assert!(matches!(modal.phase(), ModalPhase::Error(_)));
        assert!(!modal.is_visible());

        let load = modal.load(chapter_ref("2"));
        pending.respond(1, Ok(chapter_content("2")));
        load.await;
        assert!(modal.is_visible());

        // a failing activation while open leaves the overlay shown
        let load = modal.load(chapter_ref("3"));
        pending.respond(2, Err(Error::Decode("missing field `domain_cdn`".to_string())));
        load.await;
        assert!(matches!(modal.phase(), ModalPhase::Error(_)));
        assert!(modal.is_visible());
    }

    #[tokio::test]
    async fn test_dismiss_retains_content() {
        let pending = Pending::new();
        let modal = ChapterModalController::new(pending.fetch());

        let load = modal.load(chapter_ref("1"));
        pending.respond(0, Ok(chapter_content("1")));
        load.await;

        modal.dismiss();
        assert!(!modal.is_visible());
        assert!(matches!(modal.phase(), ModalPhase::Open(_)));

        assert!(modal.reopen());
        assert!(modal.is_visible());
        assert_eq!(pending.issued().len(), 1);
    }

    #[tokio::test]
    async fn test_activation_always_refetches() {
        let pending = Pending::new();
        let modal = ChapterModalController::new(pending.fetch());

        let load = modal.load(chapter_ref("1"));
        pending.respond(0, Ok(chapter_content("1")));
        load.await;
        modal.dismiss();

        let load = modal.load(chapter_ref("1"));
        assert_eq!(modal.phase(), ModalPhase::Loading);
        assert!(!modal.reopen());
        assert_eq!(pending.issued(), vec![chapter_ref("1"), chapter_ref("1")]);

        pending.respond(1, Ok(chapter_content("1")));
        load.await;
        assert!(modal.is_visible());
    }

    #[tokio::test]
    async fn test_superseded_chapter_does_not_open() {
        let pending = Pending::new();
        let modal = ChapterModalController::new(pending.fetch());

        let first = modal.load(chapter_ref("1"));
        let second = modal.load(chapter_ref("2"));

        pending.respond(0, Ok(chapter_content("1")));
        assert_eq!(first.await, Settled::Superseded);
        assert!(!modal.is_visible());

        pending.respond(1, Ok(chapter_content("2")));
        assert_eq!(second.await, Settled::Success);
        assert_eq!(modal.chapter(), Some(chapter_ref("2")));
    }

    #[tokio::test]
    async fn test_activate_through_catalog() {
        LocalSet::new()
            .run_until(async {
                let catalog = Rc::new(FakeCatalog::default());
                let modal = ChapterModalController::for_catalog(catalog.clone());

                modal.activate(chapter_ref("7"));
                match modal.settled().await {
                    ModalPhase::Open(content) => assert_eq!(content.chapter_name, "7"),
                    phase => panic!("unexpected phase {phase:?}"),
                }
                assert!(modal.is_visible());
                assert_eq!(catalog.calls.borrow().as_slice(), ["chapter_content 7"]);
            })
            .await;
    }
}
