//! Blog configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::AuthorInfo;

/// Environment variable consulted when `database.api_key` is not set
pub const DATABASE_KEY_ENV: &str = "BLOG_DATABASE_KEY";

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub description: String,

    // URL
    pub base_path: String,
    pub og_image: String,

    // Directory
    pub content_path: String,
    pub public_dir: String,
    /// Post file extensions, tried in order when looking up a slug
    pub extensions: Vec<String>,

    // Display
    pub date_format: String,

    pub authors: Vec<AuthorInfo>,

    pub database: Option<DatabaseConfig>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),

            base_path: "/blog".to_string(),
            og_image: "/og-image.png".to_string(),

            content_path: "content/blog".to_string(),
            public_dir: "public".to_string(),
            extensions: vec!["mdx".to_string(), "md".to_string()],

            date_format: "%B %-d, %Y".to_string(),

            authors: Vec::new(),

            database: None,
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// Connection settings for the hosted post table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Project URL; the REST endpoint lives under `/rest/v1/<table>`
    pub url: String,
    pub api_key: Option<String>,
    pub table: String,
    pub timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: None,
            table: "blog_posts".to_string(),
            timeout_secs: 10,
        }
    }
}

impl DatabaseConfig {
    /// The configured key, or the one from `BLOG_DATABASE_KEY`
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(DATABASE_KEY_ENV).ok())
    }

    /// Full REST endpoint of the post table
    pub fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.url.trim_end_matches('/'),
            self.table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.title, "Blog");
        assert_eq!(config.base_path, "/blog");
        assert_eq!(config.content_path, "content/blog");
        assert_eq!(config.extensions, vec!["mdx", "md"]);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Engineering Blog
description: Notes from the team
base_path: /posts
authors:
  - name: Jane Doe
    avatar: /avatars/jane.png
    bio: Writes about Rust
    social:
      github: janedoe
  - id: bob
    name: Bob
database:
  url: https://example.supabase.co/
  api_key: secret
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Engineering Blog");
        assert_eq!(config.base_path, "/posts");
        assert_eq!(config.content_path, "content/blog");
        assert_eq!(config.authors.len(), 2);

        let db = config.database.unwrap();
        assert_eq!(db.table, "blog_posts");
        assert_eq!(db.timeout_secs, 10);
        assert_eq!(db.resolve_api_key().as_deref(), Some("secret"));
        assert_eq!(
            db.endpoint(),
            "https://example.supabase.co/rest/v1/blog_posts"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From Disk\n").unwrap();

        let config = BlogConfig::load(&path).unwrap();
        assert_eq!(config.title, "From Disk");
        assert_eq!(config.public_dir, "public");
    }
}
