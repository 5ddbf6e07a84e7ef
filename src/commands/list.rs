//! List blog posts

use anyhow::Result;

use crate::helpers::format_date;
use crate::pages::visible_posts;
use crate::Blog;

/// Print the merged post list
pub async fn run(blog: &Blog, show_drafts: bool, json: bool) -> Result<()> {
    let posts = visible_posts(blog.all_posts().await?, show_drafts);

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} ({}) [{}]{}",
            format_date(&post.date, "%Y-%m-%d"),
            post.title,
            post.slug,
            post.origin,
            if post.is_draft() { " draft" } else { "" }
        );
    }

    Ok(())
}
