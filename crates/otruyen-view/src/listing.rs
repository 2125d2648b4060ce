use std::{cell::Cell, rc::Rc};

use futures_signals::signal::{Signal, SignalExt};
use otruyen_lib::{
    models::{ComicSummary, ListingQuery, ListingResult},
    pagination::{self, PaginationWindow},
    traits::Catalog,
};
use serde::Serialize;

use crate::{
    config::Config,
    fetch::{DataFetchController, Phase},
};

/// Presentation order of listing items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    /// Most recently updated first
    UpdatedDesc,
    /// As returned by the catalog
    Server,
}

impl SortOrder {
    /// Order `items` into a new vector, the input is left untouched.
    pub fn apply(&self, items: &[ComicSummary]) -> Vec<ComicSummary> {
        let mut sorted = items.to_vec();
        if let SortOrder::UpdatedDesc = self {
            sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        }

        sorted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPolicy {
    pub window_size: u32,
    pub sort: SortOrder,
    /// Only show pagination controls when there is more than one page
    pub hide_single_page: bool,
}

/// Which catalog endpoint a listing view is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    NewReleases,
    Status,
    Category,
    Search,
}

impl ListingKind {
    pub fn policy(&self, config: &Config) -> ListingPolicy {
        match self {
            ListingKind::NewReleases => ListingPolicy {
                window_size: config.home_window_size,
                sort: SortOrder::UpdatedDesc,
                hide_single_page: false,
            },
            ListingKind::Status | ListingKind::Category => ListingPolicy {
                window_size: config.listing_window_size,
                sort: SortOrder::UpdatedDesc,
                hide_single_page: false,
            },
            ListingKind::Search => ListingPolicy {
                window_size: config.listing_window_size,
                sort: SortOrder::Server,
                hide_single_page: true,
            },
        }
    }

    async fn fetch(
        self,
        catalog: Rc<dyn Catalog>,
        query: ListingQuery,
    ) -> otruyen_lib::error::Result<ListingResult> {
        let scope = query.scope.as_deref().unwrap_or_default();
        match self {
            ListingKind::NewReleases => catalog.new_releases(query.page).await,
            ListingKind::Status => catalog.status_listing(scope, query.page).await,
            ListingKind::Category => catalog.category_listing(scope, query.page).await,
            ListingKind::Search => {
                let keyword = query.keyword.as_deref().unwrap_or_default();
                catalog.search(keyword, query.page).await
            }
        }
    }
}

/// User-facing state of a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ViewPhase {
    Idle,
    Loading,
    Loaded,
    /// Loaded successfully but there is nothing to show
    Empty,
    Error(String),
}

/// Everything a listing page renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub phase: ViewPhase,
    pub query: Option<ListingQuery>,
    pub items: Vec<ComicSummary>,
    pub current_page: u32,
    pub total_pages: u32,
    pub window: PaginationWindow,
    pub has_prev: bool,
    pub has_next: bool,
    pub show_pagination: bool,
}

pub struct ListingViewModel {
    kind: Option<ListingKind>,
    policy: ListingPolicy,
    items_per_page: u32,
    controller: DataFetchController<ListingQuery, ListingResult>,
    /// Total pages of the last result shown for the current listing, used to
    /// bound page changes while a page is loading or failed
    known_total_pages: Cell<u32>,
}

impl ListingViewModel {
    pub fn new<F, Fut>(policy: ListingPolicy, items_per_page: u32, fetch: F) -> Rc<Self>
    where
        F: Fn(ListingQuery) -> Fut + 'static,
        Fut: Future<Output = otruyen_lib::error::Result<ListingResult>> + 'static,
    {
        Rc::new(Self::build(None, policy, items_per_page, fetch))
    }

    /// Bind a view to one of the catalog listing endpoints
    pub fn for_catalog(kind: ListingKind, catalog: Rc<dyn Catalog>, config: &Config) -> Rc<Self> {
        let fetch = move |query: ListingQuery| kind.fetch(catalog.clone(), query);

        Rc::new(Self::build(
            Some(kind),
            kind.policy(config),
            config.items_per_page,
            fetch,
        ))
    }

    fn build<F, Fut>(
        kind: Option<ListingKind>,
        policy: ListingPolicy,
        items_per_page: u32,
        fetch: F,
    ) -> Self
    where
        F: Fn(ListingQuery) -> Fut + 'static,
        Fut: Future<Output = otruyen_lib::error::Result<ListingResult>> + 'static,
    {
        Self {
            kind,
            policy,
            items_per_page,
            controller: DataFetchController::new(fetch),
            known_total_pages: Cell::new(0),
        }
    }

    pub fn kind(&self) -> Option<ListingKind> {
        self.kind
    }

    pub fn policy(&self) -> ListingPolicy {
        self.policy
    }

    pub fn query(&self) -> Option<ListingQuery> {
        self.controller.key()
    }

    /// Show `query`, fetching it unless it is already the current one.
    pub fn set_query(&self, query: ListingQuery) -> Phase<ListingResult> {
        if let Some(current) = self.controller.key() {
            if current == query {
                return self.controller.phase();
            }

            if current.keyword == query.keyword && current.scope == query.scope {
                self.known_total_pages.set(self.total_pages());
            } else {
                self.known_total_pages.set(0);
            }
        }

        self.controller.observe(query)
    }

    /// Move to `page`, clamped to the pages known for this listing.
    /// Returns the page actually requested.
    pub fn go_to_page(&self, page: u32) -> Option<u32> {
        let query = self.query()?;
        let target = pagination::clamp_page(page, self.total_pages());
        if target != query.page {
            self.set_query(query.with_page(target));
        }

        Some(target)
    }

    pub fn next_page(&self) -> Option<u32> {
        let page = self.query()?.page;
        self.go_to_page(page.saturating_add(1))
    }

    pub fn prev_page(&self) -> Option<u32> {
        let page = self.query()?.page;
        self.go_to_page(page.saturating_sub(1))
    }

    /// Fetch the current query again, e.g. after an error
    pub fn reload(&self) {
        if let Some(query) = self.query() {
            self.known_total_pages.set(self.total_pages());
            self.controller.refetch(query);
        }
    }

    pub fn total_pages(&self) -> u32 {
        match self.controller.phase() {
            Phase::Success(result) => result.total_pages(self.items_per_page),
            _ => self.known_total_pages.get(),
        }
    }

    pub fn view(&self) -> ListingView {
        self.compose(self.controller.phase())
    }

    pub fn view_signal(self: &Rc<Self>) -> impl Signal<Item = ListingView> + use<> {
        let model = self.clone();
        self.controller
            .phase_signal()
            .map(move |phase| model.compose(phase))
    }

    /// Wait for the current fetch to settle and return the resulting view
    pub async fn settled(&self) -> ListingView {
        let phase = self.controller.settled().await;
        self.compose(phase)
    }

    fn compose(&self, phase: Phase<ListingResult>) -> ListingView {
        let query = self.query();
        let requested_page = query.as_ref().map(|q| q.page).unwrap_or(1);

        let (phase, items, total_pages) = match phase {
            Phase::Idle => (ViewPhase::Idle, vec![], 0),
            Phase::Loading => (ViewPhase::Loading, vec![], self.known_total_pages.get()),
            Phase::Success(result) => {
                let items = self.policy.sort.apply(&result.items);
                let phase = if items.is_empty() {
                    ViewPhase::Empty
                } else {
                    ViewPhase::Loaded
                };
                (phase, items, result.total_pages(self.items_per_page))
            }
            Phase::Error(message) => (
                ViewPhase::Error(message),
                vec![],
                self.known_total_pages.get(),
            ),
        };

        // a first query may ask for a page past the end of the listing
        let current_page = if total_pages > 0 {
            pagination::clamp_page(requested_page, total_pages)
        } else {
            requested_page
        };

        ListingView {
            phase,
            query,
            items,
            current_page,
            total_pages,
            window: pagination::window(current_page, total_pages, self.policy.window_size),
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
            show_pagination: if self.policy.hide_single_page {
                total_pages > 1
            } else {
                true
            },
        }
    }
}
