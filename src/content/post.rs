//! Post records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::FrontMatter;
use crate::helpers::parse_date;
use crate::store::DatabasePost;

/// Where a post record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostOrigin {
    File,
    Database,
}

impl fmt::Display for PostOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostOrigin::File => f.write_str("file"),
            PostOrigin::Database => f.write_str("database"),
        }
    }
}

/// A blog post, independent of the source it was read from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    /// Unique within a resolved collection
    pub slug: String,

    pub title: String,

    /// Empty when the source has none
    pub description: String,

    /// Key into the author directory
    pub author: String,

    /// Date as written by the source
    pub date: String,

    /// `None` when a file post does not say
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    /// Only filled for single-post lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    pub origin: PostOrigin,
}

impl PostRecord {
    /// Build a file-origin record from parsed front-matter
    pub fn from_front_matter(slug: String, fm: FrontMatter, content: Option<String>) -> Self {
        Self {
            slug,
            title: fm.title,
            description: fm.description,
            author: fm.author,
            date: fm.date,
            draft: fm.draft,
            content,
            origin: PostOrigin::File,
        }
    }

    /// Build a database-origin record carrying the post body
    pub fn from_database_with_content(row: DatabasePost) -> Self {
        let content = row.content.clone();
        let mut record = Self::from(row);
        record.content = Some(content);
        record
    }

    pub fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }

    /// Parsed `date`; `None` sorts as the oldest possible post
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }
}

impl From<DatabasePost> for PostRecord {
    /// Listing form: the body is left out
    fn from(row: DatabasePost) -> Self {
        Self {
            slug: row.slug,
            title: row.title,
            description: row.description.unwrap_or_default(),
            author: row.author,
            date: row.date,
            draft: Some(row.draft),
            content: None,
            origin: PostOrigin::Database,
        }
    }
}
