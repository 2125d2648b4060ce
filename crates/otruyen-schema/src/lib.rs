//! Wire format of the otruyen catalog API.
//!
//! Every response is wrapped in a `{ "data": ... }` envelope. The payload
//! types here mirror the JSON field names and convert into the normalized
//! models of `otruyen-lib`.
pub mod model;

use serde::Deserialize;

pub use model::*;

#[derive(Debug, Deserialize)]
pub struct Response<T> {
    pub data: T,
}

impl<T> Response<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

pub type ListingResponse = Response<ListingData>;
pub type CategoryIndexResponse = Response<CategoryIndexData>;
pub type ComicDetailResponse = Response<ComicDetailData>;
pub type ChapterResponse = Response<ChapterData>;
