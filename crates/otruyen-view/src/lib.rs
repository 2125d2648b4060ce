#[macro_use]
extern crate log;

pub mod config;
pub mod detail;
pub mod fetch;
pub mod listing;
pub mod modal;
pub mod query;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use detail::{DetailView, DetailViewModel};
pub use fetch::{DataFetchController, Phase, Settled};
pub use listing::{ListingKind, ListingPolicy, ListingView, ListingViewModel, SortOrder, ViewPhase};
pub use modal::{ChapterModalController, ModalPhase};
pub use query::CatalogClient;
