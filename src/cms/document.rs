//! Raw CMS document types
//!
//! These mirror the wire shape of the CMS responses. Unknown fields are
//! ignored so the backend can evolve without breaking the front-end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single CMS document of the blog post type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// URL-friendly unique identifier (the post slug)
    pub uid: String,

    /// First publication timestamp; null for documents that were never
    /// published through the CMS release workflow
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Typed document payload
    pub data: DocumentData,
}

/// Payload of a post document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentData {
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    pub author: String,

    #[serde(default)]
    pub banner: Option<Banner>,

    /// Ordered content sections; order is display order
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Banner image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
}

/// One content section: a heading followed by rich-text paragraphs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub heading: String,

    /// Ordered rich-text paragraphs; order is display order
    #[serde(default)]
    pub body: Vec<Paragraph>,
}

/// A rich-text paragraph. The CMS also sends span markup per paragraph;
/// only the plain text is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub text: String,
}

/// A page of a paginated listing response.
///
/// `next_page` is the sole continuation token: an opaque URL supplied by
/// the CMS, null on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPagination {
    pub next_page: Option<String>,
    pub results: Vec<Document>,
}
