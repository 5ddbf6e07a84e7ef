//! Listing and detail pages
//!
//! Pages take already-resolved posts; fetching them is the caller's job.
//! Draft visibility is an explicit argument rather than ambient state.

mod metadata;

pub use metadata::{AuthorName, BlogMetadata, OgImage, OpenGraph, PostMetadata, TwitterCard};

use tera::Context;

use crate::config::{AuthorDirectory, BlogConfig};
use crate::content::{ComponentOverrides, MarkdownRenderer, PostRecord};
use crate::error::Result;
use crate::templates::{BlogData, PostData, TemplateRenderer};

/// Result of rendering a detail page
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Found(String),
    /// The fallback page shown when the slug resolves to nothing
    NotFound(String),
}

impl PageOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PageOutcome::Found(_))
    }

    pub fn html(&self) -> &str {
        match self {
            PageOutcome::Found(html) | PageOutcome::NotFound(html) => html,
        }
    }

    pub fn into_html(self) -> String {
        match self {
            PageOutcome::Found(html) | PageOutcome::NotFound(html) => html,
        }
    }
}

/// Posts to list: drafts are dropped unless `show_drafts` is set
pub fn visible_posts(posts: Vec<PostRecord>, show_drafts: bool) -> Vec<PostRecord> {
    if show_drafts {
        posts
    } else {
        posts.into_iter().filter(|post| !post.is_draft()).collect()
    }
}

/// One entry per post, for pre-rendering every detail page
pub fn static_params(posts: &[PostRecord]) -> Vec<String> {
    posts.iter().map(|post| post.slug.clone()).collect()
}

/// Renders blog pages from resolved posts
pub struct PageRenderer {
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
    components: ComponentOverrides,
}

impl PageRenderer {
    /// Renderer with the built-in custom elements
    pub fn new() -> Result<Self> {
        Self::with_components(ComponentOverrides::with_defaults())
    }

    pub fn with_components(components: ComponentOverrides) -> Result<Self> {
        Ok(Self {
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
            components,
        })
    }

    pub fn components(&self) -> &ComponentOverrides {
        &self.components
    }

    /// Render a post body to HTML
    pub fn render_body(&self, markdown: &str) -> String {
        self.markdown.render_with(markdown, &self.components)
    }

    /// The listing page for already filtered posts
    pub fn render_listing(
        &self,
        config: &BlogConfig,
        authors: &AuthorDirectory,
        posts: &[PostRecord],
    ) -> Result<String> {
        let posts: Vec<PostData> = posts
            .iter()
            .map(|post| PostData::new(post, &config.base_path, authors.get(&post.author)))
            .collect();

        let mut context = base_context(config);
        context.insert("meta", &BlogMetadata::from_config(config));
        context.insert("posts", &posts);

        self.templates.render("listing.html", &context)
    }

    /// The detail page for a lookup result
    ///
    /// A missing post, or one without a body, yields the not-found page.
    pub fn render_detail(
        &self,
        config: &BlogConfig,
        authors: &AuthorDirectory,
        post: Option<&PostRecord>,
    ) -> Result<PageOutcome> {
        let Some((post, body)) = post.and_then(|post| {
            post.content
                .as_deref()
                .filter(|body| !body.is_empty())
                .map(|body| (post, body))
        }) else {
            return Ok(PageOutcome::NotFound(self.render_not_found(config)?));
        };

        let data = PostData::new(post, &config.base_path, authors.get(&post.author));

        let mut context = base_context(config);
        context.insert("meta", &PostMetadata::for_post(post, config, authors));
        context.insert("post", &data);
        context.insert("content", &self.render_body(body));

        Ok(PageOutcome::Found(self.templates.render("post.html", &context)?))
    }

    pub fn render_not_found(&self, config: &BlogConfig) -> Result<String> {
        let mut context = base_context(config);
        context.insert("meta", &PostMetadata::not_found(config));
        self.templates.render("not_found.html", &context)
    }
}

fn base_context(config: &BlogConfig) -> Context {
    let mut context = Context::new();
    context.insert("blog", &BlogData::from_config(config));
    context
}
