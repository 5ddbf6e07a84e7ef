//! Create a new database post

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::helpers::post_url;
use crate::store::{DatabasePost, NewPost};
use crate::Blog;

/// Insert a post, reading its body from `body` when given
pub async fn create_post(blog: &Blog, mut post: NewPost, body: Option<&Path>) -> Result<DatabasePost> {
    if post.title.trim().is_empty() {
        anyhow::bail!("A post needs a title");
    }

    if let Some(path) = body {
        post.content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read post body {:?}", path))?;
    }

    let row = blog.create_post(post).await?;
    tracing::info!("Created database post {:?} (id {})", row.slug, row.id);

    Ok(row)
}

/// Run the new command
pub async fn run(blog: &Blog, post: NewPost, body: Option<&Path>) -> Result<()> {
    let row = create_post(blog, post, body).await?;
    println!(
        "Created: {} ({})",
        row.slug,
        post_url(&blog.config.base_path, &row.slug)
    );
    Ok(())
}
