//! Built-in blog templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping stays on for
//! every `.html` template, so post fields are escaped unless a template
//! marks them `safe`.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{AuthorInfo, BlogConfig};
use crate::content::{PostOrigin, PostRecord};
use crate::error::Result;
use crate::helpers::{format_date, github_url, linkedin_url, post_url, twitter_url};

/// Template renderer with the embedded blog templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("listing.html", include_str!("blog/listing.html")),
            ("post.html", include_str!("blog/post.html")),
            ("not_found.html", include_str!("blog/not_found.html")),
            // Partials
            (
                "partials/author_card.html",
                include_str!("blog/partials/author_card.html"),
            ),
        ])?;

        // Register custom filters
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Tera filter: format a post date for display
///
/// Dates that cannot be parsed are shown as written.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "%B %-d, %Y".to_string(),
    };

    Ok(tera::Value::String(format_date(&s, &format)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct BlogData {
    pub title: String,
    pub description: String,
    pub base_path: String,
    pub date_format: String,
}

impl BlogData {
    pub fn from_config(config: &BlogConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            base_path: config.base_path.clone(),
            date_format: config.date_format.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub draft: bool,
    pub origin: PostOrigin,
    pub author: Option<AuthorData>,
}

impl PostData {
    /// Template view of a post; `author` is resolved through the directory
    pub fn new(post: &PostRecord, base_path: &str, author: Option<&AuthorInfo>) -> Self {
        Self {
            slug: post.slug.clone(),
            url: post_url(base_path, &post.slug),
            title: post.title.clone(),
            description: post.description.clone(),
            date: post.date.clone(),
            draft: post.is_draft(),
            origin: post.origin,
            author: author.map(AuthorData::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorData {
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub links: Vec<SocialLink>,
}

impl From<&AuthorInfo> for AuthorData {
    fn from(author: &AuthorInfo) -> Self {
        let social = &author.social;
        let links = [
            ("twitter", "Twitter", social.twitter.as_deref().map(twitter_url)),
            ("github", "GitHub", social.github.as_deref().map(github_url)),
            ("linkedin", "LinkedIn", social.linkedin.as_deref().map(linkedin_url)),
        ]
        .into_iter()
        .filter_map(|(network, label, url)| {
            url.map(|url| SocialLink {
                network,
                label,
                url,
            })
        })
        .collect();

        Self {
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            bio: author.bio.clone(),
            links,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLink {
    pub network: &'static str,
    pub label: &'static str,
    pub url: String,
}
