//! blogfront: a blog module merging file posts with database posts
//!
//! Posts come from two places: markdown files in a content directory and
//! rows in a hosted database table. The resolver merges both into one
//! newest-first collection where the database wins every slug collision,
//! and the page layer renders listing and detail pages from the result.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod pages;
pub mod resolver;
pub mod server;
pub mod store;
pub mod templates;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{AuthorDirectory, BlogConfig};
use content::{FilePostSource, PostRecord};
use error::{BlogError, Result};
use pages::{BlogMetadata, PageOutcome, PageRenderer, PostMetadata};
use store::{DatabasePost, MemoryPostStore, NewPost, PostStore, RestPostStore};

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    files: FilePostSource,
    store: Arc<dyn PostStore>,
    authors: AuthorDirectory,
    pages: Arc<PageRenderer>,
}

impl Blog {
    /// Open the blog rooted at `base_dir`, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            BlogConfig::load(&config_path)?
        } else {
            BlogConfig::default()
        };

        let store = open_store(&config)?;
        Ok(Self::with_store(base_dir, config, store)?)
    }

    /// Build a blog over an explicit post store
    pub fn with_store<P: Into<PathBuf>>(
        base_dir: P,
        config: BlogConfig,
        store: Arc<dyn PostStore>,
    ) -> Result<Self> {
        if !config.base_path.starts_with('/') {
            return Err(BlogError::Config(format!(
                "base_path must start with '/', got {:?}",
                config.base_path
            )));
        }
        if config.extensions.is_empty() {
            return Err(BlogError::Config(
                "at least one post file extension is required".to_string(),
            ));
        }

        let base_dir = base_dir.into();
        let files = FilePostSource::from_config(&base_dir, &config);
        let public_dir = base_dir.join(&config.public_dir);
        let authors = AuthorDirectory::new(&config.authors);

        Ok(Self {
            files,
            public_dir,
            authors,
            store,
            pages: Arc::new(PageRenderer::new()?),
            base_dir,
            config,
        })
    }

    pub fn files(&self) -> &FilePostSource {
        &self.files
    }

    pub fn store(&self) -> &dyn PostStore {
        self.store.as_ref()
    }

    pub fn authors(&self) -> &AuthorDirectory {
        &self.authors
    }

    pub fn pages(&self) -> &PageRenderer {
        &self.pages
    }

    /// All posts, drafts included, newest first
    pub async fn all_posts(&self) -> Result<Vec<PostRecord>> {
        resolver::resolve_all_posts(&self.files, self.store()).await
    }

    /// One post with its body
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>> {
        resolver::resolve_one_by_slug(slug, &self.files, self.store()).await
    }

    /// Store a new database post
    pub async fn create_post(&self, post: NewPost) -> Result<DatabasePost> {
        Ok(self.store.insert_post(post).await?)
    }

    pub fn metadata(&self) -> BlogMetadata {
        BlogMetadata::from_config(&self.config)
    }

    pub async fn post_metadata(&self, slug: &str) -> Result<PostMetadata> {
        let post = self.post_by_slug(slug).await?;
        Ok(PostMetadata::resolve(
            post.as_ref(),
            &self.config,
            &self.authors,
        ))
    }

    /// Every slug that has a detail page
    pub async fn static_params(&self) -> Result<Vec<String>> {
        Ok(pages::static_params(&self.all_posts().await?))
    }

    pub async fn listing_page(&self, show_drafts: bool) -> Result<String> {
        let posts = pages::visible_posts(self.all_posts().await?, show_drafts);
        self.pages
            .render_listing(&self.config, &self.authors, &posts)
    }

    pub async fn post_page(&self, slug: &str) -> Result<PageOutcome> {
        let post = self.post_by_slug(slug).await?;
        self.pages
            .render_detail(&self.config, &self.authors, post.as_ref())
    }
}

fn open_store(config: &BlogConfig) -> anyhow::Result<Arc<dyn PostStore>> {
    match &config.database {
        Some(database) if !database.url.is_empty() => {
            let store = RestPostStore::from_config(database)?;
            tracing::debug!("Using database posts from {}", store.endpoint());
            Ok(Arc::new(store))
        }
        _ => {
            tracing::warn!("No database configured; only file posts will be served");
            Ok(Arc::new(MemoryPostStore::new()))
        }
    }
}
