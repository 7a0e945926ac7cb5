//! Content module - shapes raw CMS documents into renderable view models

mod listing;
mod post;
pub mod reading;

pub use listing::Listing;
pub use post::{PostDetail, PostSummary, Section};
