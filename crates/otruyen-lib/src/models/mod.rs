pub mod comic;
pub use comic::*;

pub mod chapter;
pub use chapter::*;

pub mod listing;
pub use listing::*;
