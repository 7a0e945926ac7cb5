//! List site content from the CMS

use anyhow::Result;

use crate::cms::CmsClient;
use crate::content::PostSummary;
use crate::helpers::date;
use crate::Blog;

/// List site content by type
pub async fn run(blog: &Blog, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let client = CmsClient::new(&blog.config.cms)?;
            let tz = date::parse_timezone(&blog.config.timezone);
            let kind = &blog.config.cms.document_type;

            // Walk the listing to the end of its pagination
            let mut page = client.get_by_type(kind, blog.config.per_page).await?;
            let mut posts: Vec<PostSummary> = Vec::new();
            loop {
                posts.extend(page.results.iter().map(|doc| PostSummary::from_document(doc, tz)));
                match page.next_page.take() {
                    Some(next) => page = client.get_page(&next).await?,
                    None => break,
                }
            }

            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.first_publication_date.as_deref().unwrap_or("          "),
                    post.title,
                    post.uid
                );
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post", content_type);
        }
    }

    Ok(())
}
