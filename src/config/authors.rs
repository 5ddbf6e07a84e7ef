//! Author directory
//!
//! Authors are configured once and looked up by the identifier stored in a
//! post's `author` field. Nothing here is written by the resolver.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A configured author
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorInfo {
    /// Lookup key; falls back to `name` when empty
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub social: SocialHandles,
}

impl AuthorInfo {
    pub fn key(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }
}

/// Optional social network handles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialHandles {
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

/// Read-only mapping from author identifier to author
#[derive(Debug, Clone, Default)]
pub struct AuthorDirectory {
    authors: IndexMap<String, AuthorInfo>,
}

impl AuthorDirectory {
    pub fn new(authors: &[AuthorInfo]) -> Self {
        let authors = authors
            .iter()
            .map(|author| (author.key().to_string(), author.clone()))
            .collect();
        Self { authors }
    }

    pub fn get(&self, id: &str) -> Option<&AuthorInfo> {
        self.authors.get(id)
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
