//! Generator module - writes the blog as static HTML files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::helpers::is_file_safe_slug;
use crate::pages::{self, PageOutcome};
use crate::Blog;

/// Static blog generator
pub struct Generator {
    blog: Blog,
}

/// What a generation run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: usize,
    pub skipped: Vec<String>,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Directory holding the blog's pages inside the public directory
    pub fn output_root(&self) -> PathBuf {
        let base = self.blog.config.base_path.trim_matches('/');
        if base.is_empty() {
            self.blog.public_dir.clone()
        } else {
            self.blog.public_dir.join(base)
        }
    }

    /// Generate the listing, the not-found page and one page per listed post
    pub async fn generate(&self, show_drafts: bool) -> Result<GenerateReport> {
        let root = self.output_root();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create dir {:?}", root))?;

        let posts = pages::visible_posts(self.blog.all_posts().await?, show_drafts);
        let mut report = GenerateReport::default();

        let listing = self
            .blog
            .pages()
            .render_listing(&self.blog.config, self.blog.authors(), &posts)?;
        write_page(&root.join("index.html"), &listing)?;
        report.pages += 1;

        let not_found = self.blog.pages().render_not_found(&self.blog.config)?;
        write_page(&root.join("404.html"), &not_found)?;
        report.pages += 1;

        for slug in pages::static_params(&posts) {
            if !is_file_safe_slug(&slug) {
                tracing::warn!("Skipping post with unsafe slug {:?}", slug);
                report.skipped.push(slug);
                continue;
            }

            match self.blog.post_page(&slug).await? {
                PageOutcome::Found(html) => {
                    write_page(&root.join(&slug).join("index.html"), &html)?;
                    report.pages += 1;
                }
                PageOutcome::NotFound(_) => {
                    tracing::warn!("Post {:?} has no body, skipping its page", slug);
                    report.skipped.push(slug);
                }
            }
        }

        Ok(report)
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}
