//! Post view models
//!
//! Shaping copies the document fields verbatim and localizes the
//! publication date; nothing here mutates after construction.

use chrono_tz::Tz;
use serde::Serialize;

use crate::cms::Document;
use crate::content::reading;
use crate::helpers::{date, html};

/// A post as shown in the listing
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub uid: String,
    /// Localized display date, e.g. "19 Abr 2021"; `None` for documents
    /// without a publication date
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Shape a raw document into its listing form
    pub fn from_document(doc: &Document, tz: Tz) -> Self {
        Self {
            uid: doc.uid.clone(),
            first_publication_date: date::format_publication_date(
                doc.first_publication_date.as_ref(),
                tz,
            ),
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
        }
    }
}

/// One rendered content section of a detail page
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub heading: String,
    /// Sanitized markup produced from the rich-text paragraphs
    pub body_html: String,
}

/// A post as shown on its detail page
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub banner_url: Option<String>,
    pub author: String,
    /// Ordered sections; order is display order
    pub sections: Vec<Section>,
    /// Estimated reading time in minutes, recomputed on every shaping
    pub read_time: u32,
}

impl PostDetail {
    /// Shape a raw document into its detail form
    pub fn from_document(doc: &Document, tz: Tz) -> Self {
        let total_words = reading::total_words(&doc.data.content);

        let sections = doc
            .data
            .content
            .iter()
            .map(|block| Section {
                heading: block.heading.clone(),
                body_html: html::render_rich_text(&block.body),
            })
            .collect();

        Self {
            uid: doc.uid.clone(),
            first_publication_date: date::format_publication_date(
                doc.first_publication_date.as_ref(),
                tz,
            ),
            title: doc.data.title.clone(),
            banner_url: doc.data.banner.as_ref().map(|b| b.url.clone()),
            author: doc.data.author.clone(),
            sections,
            read_time: reading::read_time(total_words),
        }
    }
}
