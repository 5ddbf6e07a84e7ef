//! Database post sources
//!
//! `PostStore` is the seam between the resolver and whatever holds the
//! database-backed posts. The hosted database is reached over its REST
//! interface; an in-memory store backs tests and database-less setups.

mod memory;
mod rest;
mod types;

pub use memory::MemoryPostStore;
pub use rest::RestPostStore;
pub use types::{DatabasePost, NewPost, PostInsert};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("database returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("a post with slug `{0}` already exists")]
    Duplicate(String),
    #[error("database returned no row for the inserted post")]
    EmptyInsert,
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// All stored posts, newest `date` first
    async fn list_posts(&self) -> Result<Vec<DatabasePost>, StoreError>;

    /// The post with exactly this slug, if any
    async fn find_by_slug(&self, slug: &str) -> Result<Option<DatabasePost>, StoreError>;

    /// Insert a post and return the stored row
    async fn insert_post(&self, post: NewPost) -> Result<DatabasePost, StoreError>;
}
