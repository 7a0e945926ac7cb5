//! Content Client - wraps the headless CMS HTTP API
//!
//! The CMS owns all content; this module only fetches documents of the
//! configured type, either as paginated listings or individually by UID,
//! and follows the opaque `next_page` continuation URL.

mod client;
mod document;

pub use client::{CmsClient, CmsError};
pub use document::{Banner, ContentBlock, Document, DocumentData, Paragraph, PostPagination};
