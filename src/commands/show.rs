//! Show a single post

use anyhow::Result;

use crate::Blog;

/// Print one post, or its page metadata as JSON
pub async fn run(blog: &Blog, slug: &str, meta: bool) -> Result<()> {
    if meta {
        let metadata = blog.post_metadata(slug).await?;
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    let Some(post) = blog.post_by_slug(slug).await? else {
        anyhow::bail!("Post not found: {}", slug);
    };

    println!("{}", post.title);
    println!("  slug:   {}", post.slug);
    println!("  origin: {}", post.origin);
    println!("  date:   {}", post.date);
    if !post.author.is_empty() {
        println!("  author: {}", post.author);
    }
    if post.is_draft() {
        println!("  draft:  true");
    }
    if !post.description.is_empty() {
        println!();
        println!("{}", post.description);
    }
    println!();
    println!("{}", post.content.unwrap_or_default());

    Ok(())
}
