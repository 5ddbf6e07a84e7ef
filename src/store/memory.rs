//! In-process post store

use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{DatabasePost, NewPost, PostStore, StoreError};
use crate::helpers::{iso_timestamp, parse_date};

/// Post table kept in memory
///
/// Used when no database is configured, and as a deterministic store in
/// tests. Slugs are unique, like the hosted table's constraint.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: Mutex<Vec<DatabasePost>>,
    next_id: AtomicU64,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing rows
    pub fn with_posts(posts: Vec<DatabasePost>) -> Self {
        let next_id = AtomicU64::new(posts.len() as u64);
        Self {
            posts: Mutex::new(posts),
            next_id,
        }
    }

    fn rows(&self) -> MutexGuard<'_, Vec<DatabasePost>> {
        self.posts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list_posts(&self) -> Result<Vec<DatabasePost>, StoreError> {
        let mut posts = self.rows().clone();
        posts.sort_by_cached_key(|post| Reverse(parse_date(&post.date)));
        Ok(posts)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<DatabasePost>, StoreError> {
        Ok(self.rows().iter().find(|post| post.slug == slug).cloned())
    }

    async fn insert_post(&self, post: NewPost) -> Result<DatabasePost, StoreError> {
        let now = Utc::now();
        let insert = post.into_insert(now);

        let mut rows = self.rows();
        if rows.iter().any(|existing| existing.slug == insert.slug) {
            return Err(StoreError::Duplicate(insert.slug));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let timestamp = iso_timestamp(&now);
        let row = DatabasePost {
            id: id.to_string(),
            slug: insert.slug,
            title: insert.title,
            description: insert.description,
            author: insert.author,
            content: insert.content,
            draft: insert.draft,
            created_at: timestamp.clone(),
            updated_at: timestamp,
            date: insert.date,
        };
        rows.push(row.clone());

        Ok(row)
    }
}
