pub mod error;
pub mod models;
pub mod pagination;
pub mod prelude;
pub mod traits;

/// Reported in the `User-Agent` of catalog requests
pub static LIB_VERSION: &str = env!("CARGO_PKG_VERSION");
