//! Listing state - the in-memory post list behind the index page

use chrono_tz::Tz;
use serde::Serialize;

use crate::cms::PostPagination;
use crate::content::PostSummary;

/// The listing's in-memory state: shaped posts plus the continuation
/// cursor of the last fetched page.
///
/// [`Listing::append`] is the only mutation path; posts are never removed
/// or reordered after they are shaped in.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// Opaque continuation URL; `None` once the listing is exhausted
    pub next_page: Option<String>,
    pub posts: Vec<PostSummary>,
}

impl Listing {
    /// Build the initial state from the first pagination response
    pub fn new(page: &PostPagination, tz: Tz) -> Self {
        let mut listing = Self {
            next_page: None,
            posts: Vec::new(),
        };
        listing.append(page, tz);
        listing
    }

    /// Shape a page's results, append them in response order, and replace
    /// the stored cursor with the page's cursor
    pub fn append(&mut self, page: &PostPagination, tz: Tz) {
        self.posts
            .extend(page.results.iter().map(|doc| PostSummary::from_document(doc, tz)));
        self.next_page = page.next_page.clone();
    }

    /// Whether a "load more" action is available
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{Document, DocumentData};
    use chrono::{TimeZone, Utc};

    fn tz() -> Tz {
        "America/Sao_Paulo".parse().unwrap()
    }

    fn doc(uid: &str) -> Document {
        Document {
            uid: uid.to_string(),
            first_publication_date: Some(Utc.with_ymd_and_hms(2021, 4, 19, 10, 0, 0).unwrap()),
            data: DocumentData {
                title: format!("T-{}", uid),
                subtitle: format!("S-{}", uid),
                author: "Au1".to_string(),
                banner: None,
                content: Vec::new(),
            },
        }
    }

    fn page(next: Option<&str>, uids: &[&str]) -> PostPagination {
        PostPagination {
            next_page: next.map(|s| s.to_string()),
            results: uids.iter().map(|uid| doc(uid)).collect(),
        }
    }

    #[test]
    fn test_initial_page() {
        let listing = Listing::new(&page(Some("/p2"), &["a"]), tz());
        assert_eq!(listing.posts.len(), 1);
        assert_eq!(listing.posts[0].uid, "a");
        assert_eq!(listing.posts[0].first_publication_date.as_deref(), Some("19 Abr 2021"));
        assert!(listing.has_more());
    }

    #[test]
    fn test_append_preserves_fetch_order() {
        let mut listing = Listing::new(&page(Some("/p2"), &["a", "b"]), tz());
        listing.append(&page(Some("/p3"), &["c"]), tz());
        listing.append(&page(None, &["d", "e"]), tz());

        let uids: Vec<_> = listing.posts.iter().map(|p| p.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_append_replaces_cursor() {
        let mut listing = Listing::new(&page(Some("/p2"), &["a"]), tz());
        listing.append(&page(None, &["b"]), tz());
        assert_eq!(listing.posts.len(), 2);
        assert!(!listing.has_more());
        assert!(listing.next_page.is_none());
    }
}
