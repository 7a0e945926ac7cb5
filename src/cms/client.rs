//! HTTP client for the CMS REST API

use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use crate::cms::document::{Document, PostPagination};
use crate::config::CmsConfig;

/// Errors surfaced by the Content Client
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CMS returned status {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("document {kind}/{uid} not found")]
    NotFound { kind: String, uid: String },

    #[error("pagination cursor does not point at the CMS host: {0}")]
    ForeignCursor(String),

    #[error("invalid CMS API url: {0}")]
    InvalidApiUrl(#[from] url::ParseError),
}

/// Client for the headless CMS.
///
/// All content operations go through the `documents/search` endpoint with a
/// predicate on the document type or UID, or through the opaque `next_page`
/// URL returned by a previous listing response.
#[derive(Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    api_url: Url,
    access_token: Option<String>,
}

impl CmsClient {
    /// Create a client from the CMS configuration
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let api_url = Url::parse(&config.api_url)?;

        Ok(Self {
            http,
            api_url,
            access_token: config.access_token.clone(),
        })
    }

    /// Fetch the first page of documents of `kind`, `page_size` at a time
    pub async fn get_by_type(&self, kind: &str, page_size: usize) -> Result<PostPagination, CmsError> {
        let predicate = format!(r#"[[at(document.type,"{}")]]"#, kind);
        let page_size = page_size.to_string();
        let url = self.search_url()?;

        let mut request = self.http.get(url).query(&[
            ("q", predicate.as_str()),
            ("pageSize", page_size.as_str()),
        ]);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let response = request.send().await?;
        Self::check_status(&response)?;
        Ok(response.json::<PostPagination>().await?)
    }

    /// Fetch a single document of `kind` by its UID.
    ///
    /// An empty result set maps to [`CmsError::NotFound`], never a panic.
    pub async fn get_by_uid(&self, kind: &str, uid: &str) -> Result<Document, CmsError> {
        let predicate = format!(r#"[[at(my.{}.uid,"{}")]]"#, kind, uid);
        let url = self.search_url()?;

        let mut request = self
            .http
            .get(url)
            .query(&[("q", predicate.as_str()), ("pageSize", "1")]);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let response = request.send().await?;
        Self::check_status(&response)?;
        let mut page = response.json::<PostPagination>().await?;

        if page.results.is_empty() {
            return Err(CmsError::NotFound {
                kind: kind.to_string(),
                uid: uid.to_string(),
            });
        }
        Ok(page.results.remove(0))
    }

    /// Follow a `next_page` continuation URL from a previous listing page.
    ///
    /// The cursor is opaque but must stay on the CMS host; anything else is
    /// refused before a request goes out.
    pub async fn get_page(&self, next_page: &str) -> Result<PostPagination, CmsError> {
        let url = Url::parse(next_page).map_err(|_| CmsError::ForeignCursor(next_page.to_string()))?;
        if url.host_str() != self.api_url.host_str() {
            return Err(CmsError::ForeignCursor(next_page.to_string()));
        }

        let response = self.http.get(url).send().await?;
        Self::check_status(&response)?;
        Ok(response.json::<PostPagination>().await?)
    }

    fn search_url(&self) -> Result<Url, CmsError> {
        let base = format!("{}/", self.api_url.as_str().trim_end_matches('/'));
        let base = Url::parse(&base)?;
        Ok(base.join("documents/search")?)
    }

    fn check_status(response: &reqwest::Response) -> Result<(), CmsError> {
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status,
                url: response.url().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> CmsClient {
        CmsClient::new(&CmsConfig {
            api_url: "https://blog.cdn.example.io/api/v2".to_string(),
            ..CmsConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_search_url() {
        let client = test_client();
        assert_eq!(
            client.search_url().unwrap().as_str(),
            "https://blog.cdn.example.io/api/v2/documents/search"
        );
    }

    #[tokio::test]
    async fn test_get_page_rejects_foreign_cursor() {
        let client = test_client();
        let err = client
            .get_page("https://attacker.example.com/api/v2/documents/search?page=2")
            .await
            .unwrap_err();
        assert!(matches!(err, CmsError::ForeignCursor(_)));
    }

    #[tokio::test]
    async fn test_get_page_rejects_garbage_cursor() {
        let client = test_client();
        let err = client.get_page("not a url").await.unwrap_err();
        assert!(matches!(err, CmsError::ForeignCursor(_)));
    }
}
