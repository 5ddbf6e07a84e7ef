//! Slug-keyed merge structure

use indexmap::IndexMap;
use std::cmp::Reverse;

use crate::content::PostRecord;

/// Ordered association of slug to post
///
/// Inserting a post whose slug is already present replaces the earlier
/// record entirely; no fields are blended. The replacement keeps the slot
/// of the record it replaced.
#[derive(Debug, Default)]
pub struct PostIndex {
    posts: IndexMap<String, PostRecord>,
}

impl PostIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by slug, returning the replaced record
    pub fn insert(&mut self, post: PostRecord) -> Option<PostRecord> {
        self.posts.insert(post.slug.clone(), post)
    }

    pub fn get(&self, slug: &str) -> Option<&PostRecord> {
        self.posts.get(slug)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// All records, newest first
    ///
    /// Records whose date cannot be parsed come last. Equal dates keep
    /// their index order.
    pub fn into_sorted(self) -> Vec<PostRecord> {
        let mut posts: Vec<PostRecord> = self.posts.into_values().collect();
        posts.sort_by_cached_key(|post| Reverse(post.timestamp()));
        posts
    }
}

impl Extend<PostRecord> for PostIndex {
    fn extend<I: IntoIterator<Item = PostRecord>>(&mut self, iter: I) {
        for post in iter {
            self.insert(post);
        }
    }
}
