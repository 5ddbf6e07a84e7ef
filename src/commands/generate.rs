//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Generate the static blog
pub async fn run(blog: &Blog, show_drafts: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(blog);
    let report = generator.generate(show_drafts).await?;

    tracing::info!(
        "Generated {} pages into {:?} in {:.2}s",
        report.pages,
        generator.output_root(),
        start.elapsed().as_secs_f64()
    );
    if !report.skipped.is_empty() {
        tracing::warn!("Skipped {} posts: {}", report.skipped.len(), report.skipped.join(", "));
    }

    Ok(())
}
