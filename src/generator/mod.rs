//! Generator module - renders the static site from CMS content

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use chrono_tz::Tz;
use tera::Context;
use walkdir::WalkDir;

use crate::cms::CmsClient;
use crate::content::{Listing, PostDetail};
use crate::helpers::date;
use crate::templates::{SiteMeta, TemplateRenderer, THEME_CSS};
use crate::Blog;

/// Static site generator backed by the embedded theme
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    tz: Tz,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let tz = date::parse_timezone(&blog.config.timezone);

        Ok(Self {
            blog: blog.clone(),
            renderer,
            tz,
        })
    }

    /// Timezone used for display dates
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Generate the entire site.
    ///
    /// Fetches the first listing page for the index, then walks the CMS
    /// pagination to the end so every known slug gets a detail page. Any
    /// fetch or render failure aborts the build.
    pub async fn generate(&self, client: &CmsClient) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;
        self.write_assets()?;

        let kind = &self.blog.config.cms.document_type;
        let first = client.get_by_type(kind, self.blog.config.per_page).await?;

        // Index page: first page of results plus the continuation cursor
        // for the in-browser "load more" control
        let listing = Listing::new(&first, self.tz);
        let index_html = self.render_listing(&listing)?;
        fs::write(self.blog.public_dir.join("index.html"), index_html)?;
        tracing::info!("Generated index with {} posts", listing.posts.len());

        // Enumerate every slug by following next_page until the end
        let mut documents = first.results;
        let mut next = first.next_page;
        while let Some(url) = next {
            let page = client.get_page(&url).await?;
            documents.extend(page.results);
            next = page.next_page;
        }

        for document in &documents {
            let detail = PostDetail::from_document(document, self.tz);
            let html = self.render_post(&detail)?;
            let path = self.write_post_page(&document.uid, &html)?;
            tracing::debug!("Generated post: {:?}", path);
        }
        tracing::info!("Generated {} post pages", documents.len());

        // Static 404 for hosts that serve it directly
        fs::write(
            self.blog.public_dir.join("404.html"),
            self.render_not_found()?,
        )?;

        Ok(())
    }

    /// Render the listing page
    pub fn render_listing(&self, listing: &Listing) -> Result<String> {
        let mut context = self.base_context();
        context.insert("listing", listing);
        self.renderer.render("index.html", &context)
    }

    /// Render a post detail page
    pub fn render_post(&self, post: &PostDetail) -> Result<String> {
        let mut context = self.base_context();
        context.insert("post", post);
        self.renderer.render("post.html", &context)
    }

    /// Render the loading placeholder shown while an on-demand build is
    /// in flight
    pub fn render_loading(&self) -> Result<String> {
        self.renderer.render("loading.html", &self.base_context())
    }

    /// Render the "not found" page
    pub fn render_not_found(&self) -> Result<String> {
        self.renderer.render("not_found.html", &self.base_context())
    }

    /// Write a rendered detail page under `post/<uid>/index.html`,
    /// registering the path for subsequent requests
    pub fn write_post_page(&self, uid: &str, html: &str) -> Result<PathBuf> {
        let output_path = self.post_page_path(uid);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(output_path)
    }

    /// Output path of a detail page
    pub fn post_page_path(&self, uid: &str) -> PathBuf {
        self.blog
            .public_dir
            .join("post")
            .join(uid)
            .join("index.html")
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteMeta::from_config(&self.blog.config));
        context
    }

    /// Write the embedded stylesheet and copy the optional static assets
    /// directory into the public tree
    fn write_assets(&self) -> Result<()> {
        let css_dir = self.blog.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("common.css"), THEME_CSS)?;

        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(static_dir)?;
                let dest = self.blog.public_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{Document, DocumentData, PostPagination};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn test_blog(dir: &TempDir) -> Blog {
        Blog::new(dir.path()).unwrap()
    }

    fn doc(uid: &str) -> Document {
        Document {
            uid: uid.to_string(),
            first_publication_date: Some(Utc.with_ymd_and_hms(2021, 4, 19, 10, 0, 0).unwrap()),
            data: DocumentData {
                title: "T1".to_string(),
                subtitle: "S1".to_string(),
                author: "Au1".to_string(),
                banner: None,
                content: Vec::new(),
            },
        }
    }

    #[test]
    fn test_write_post_page() {
        let dir = TempDir::new().unwrap();
        let generator = Generator::new(&test_blog(&dir)).unwrap();

        let path = generator.write_post_page("meu-post", "<html></html>").unwrap();
        assert!(path.ends_with("post/meu-post/index.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_assets_creates_stylesheet() {
        let dir = TempDir::new().unwrap();
        let blog = test_blog(&dir);
        let generator = Generator::new(&blog).unwrap();

        generator.write_assets().unwrap();
        assert!(blog.public_dir.join("css/common.css").exists());
    }

    #[test]
    fn test_render_listing_shows_cursor_control() {
        let dir = TempDir::new().unwrap();
        let generator = Generator::new(&test_blog(&dir)).unwrap();

        let listing = Listing::new(
            &PostPagination {
                next_page: Some("https://cms/p2".to_string()),
                results: vec![doc("a")],
            },
            generator.timezone(),
        );
        let html = generator.render_listing(&listing).unwrap();
        assert!(html.contains("Carregar mais posts"));
        assert!(html.contains("https://cms/p2"));
    }
}
