//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// IANA timezone name used to localize publication dates
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Pagination
    pub per_page: usize,

    // Content backend
    pub cms: CmsConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "pt-br".to_string(),
            timezone: "America/Sao_Paulo".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            per_page: 20,

            cms: CmsConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Content backend configuration.
///
/// The CMS endpoint and credentials are carried here explicitly; nothing in
/// the crate reads them from the environment or other ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the CMS REST API, e.g.
    /// `https://spacetraveling.cdn.example.io/api/v2`
    pub api_url: String,
    /// Optional access token appended to every request
    pub access_token: Option<String>,
    /// Document type holding blog posts
    pub document_type: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api/v2".to_string(),
            access_token: None,
            document_type: "posts".to_string(),
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "spacetraveling");
        assert_eq!(config.timezone, "America/Sao_Paulo");
        assert_eq!(config.per_page, 20);
        assert_eq!(config.cms.document_type, "posts");
        assert!(config.cms.access_token.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
per_page: 5
cms:
  api_url: https://blog.cdn.example.io/api/v2
  access_token: secret
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.cms.api_url, "https://blog.cdn.example.io/api/v2");
        assert_eq!(config.cms.access_token.as_deref(), Some("secret"));
        // Unspecified fields keep their defaults
        assert_eq!(config.cms.document_type, "posts");
    }
}
