//! Metadata for search-engine and social tags

use serde::Serialize;

use crate::config::{AuthorDirectory, BlogConfig};
use crate::content::PostRecord;

const OG_IMAGE_SIZE: u32 = 512;

/// Title and description of the blog itself
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogMetadata {
    pub title: String,
    pub description: String,
}

impl BlogMetadata {
    pub fn from_config(config: &BlogConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
        }
    }
}

/// Page metadata for one post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<AuthorName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<TwitterCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub published_time: String,
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub images: Vec<String>,
}

impl PostMetadata {
    /// Metadata for a lookup result; `None` gives the not-found metadata
    pub fn resolve(post: Option<&PostRecord>, config: &BlogConfig, authors: &AuthorDirectory) -> Self {
        match post {
            Some(post) => Self::for_post(post, config, authors),
            None => Self::not_found(config),
        }
    }

    pub fn for_post(post: &PostRecord, config: &BlogConfig, authors: &AuthorDirectory) -> Self {
        let description = if post.description.is_empty() {
            "No description".to_string()
        } else {
            post.description.clone()
        };

        // Display name when the directory knows the author, raw key otherwise
        let author_name = authors
            .get(&post.author)
            .map(|author| author.name.clone())
            .unwrap_or_else(|| post.author.clone());

        Self {
            title: format!("{} | {}", post.title, config.title),
            description,
            authors: vec![AuthorName { name: author_name }],
            open_graph: Some(OpenGraph {
                title: post.title.clone(),
                description: post.description.clone(),
                kind: "article".to_string(),
                published_time: post.date.clone(),
                images: vec![OgImage {
                    url: config.og_image.clone(),
                    width: OG_IMAGE_SIZE,
                    height: OG_IMAGE_SIZE,
                    alt: post.title.clone(),
                }],
            }),
            twitter: Some(TwitterCard {
                card: "summary_large_image".to_string(),
                images: vec![config.og_image.clone()],
            }),
        }
    }

    pub fn not_found(config: &BlogConfig) -> Self {
        Self {
            title: format!("Post Not Found | {}", config.title),
            description: "The requested blog post could not be found.".to_string(),
            authors: Vec::new(),
            open_graph: None,
            twitter: None,
        }
    }
}
