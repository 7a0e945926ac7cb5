//! Generate static files from CMS content

use anyhow::Result;

use crate::cms::CmsClient;
use crate::generator::Generator;
use crate::Blog;

/// Generate the static site.
///
/// A CMS fetch or decode failure aborts the whole run; a build against an
/// unreachable backend must fail loudly, not publish a partial tree.
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let client = CmsClient::new(&blog.config.cms)?;
    let generator = Generator::new(blog)?;

    generator.generate(&client).await?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
