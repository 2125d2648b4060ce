pub use crate::error::{Error, Result};
pub use crate::models::*;
pub use crate::pagination::{PaginationWindow, clamp_page, total_pages, window};
pub use crate::traits::Catalog;
