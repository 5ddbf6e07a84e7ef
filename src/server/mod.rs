//! Blog HTTP server
//!
//! Pages are rendered per request from freshly resolved posts, so edits to
//! the content directory and database show up without a rebuild.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::BlogError;
use crate::pages::{PageOutcome, PostMetadata};
use crate::Blog;

/// Server state
struct ServerState {
    blog: Blog,
    show_drafts: bool,
}

/// Build the router for a blog
///
/// `<base_path>` serves the listing, `<base_path>/:slug` a single post and
/// `/api/metadata[/:slug]` the page metadata as JSON.
pub fn router(blog: Blog, show_drafts: bool) -> Router {
    let base = blog.config.base_path.trim_end_matches('/').to_string();
    let listing_path = if base.is_empty() {
        "/".to_string()
    } else {
        base.clone()
    };

    let state = Arc::new(ServerState { blog, show_drafts });

    Router::new()
        .route(&listing_path, get(listing_handler))
        .route(&format!("{}/:slug", base), get(post_handler))
        .route("/api/metadata", get(blog_metadata_handler))
        .route("/api/metadata/:slug", get(post_metadata_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the blog server
pub async fn start(blog: &Blog, ip: &str, port: u16, show_drafts: bool) -> Result<()> {
    let app = router(blog.clone(), show_drafts);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!(
        "Server running at http://{}:{}{}",
        ip, port, blog.config.base_path
    );
    if show_drafts {
        println!("Draft posts are visible.");
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Failure while building a response
struct ServerError(BlogError);

impl From<BlogError> for ServerError {
    fn from(e: BlogError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

async fn listing_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Html<String>, ServerError> {
    Ok(Html(state.blog.listing_page(state.show_drafts).await?))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, ServerError> {
    let response = match state.blog.post_page(&slug).await? {
        PageOutcome::Found(html) => Html(html).into_response(),
        PageOutcome::NotFound(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
    };
    Ok(response)
}

async fn blog_metadata_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.blog.metadata())
}

async fn post_metadata_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, ServerError> {
    let blog = &state.blog;
    let post = blog.post_by_slug(&slug).await?;
    let status = if post.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    let metadata = PostMetadata::resolve(post.as_ref(), &blog.config, blog.authors());

    Ok((status, Json(metadata)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlogConfig;
    use crate::store::{DatabasePost, MemoryPostStore};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::fs;
    use tower::ServiceExt;

    fn blog(dir: &std::path::Path, config: BlogConfig) -> Blog {
        let content = dir.join(&config.content_path);
        fs::create_dir_all(&content).unwrap();
        fs::write(
            content.join("from-file.md"),
            "---\ntitle: From a file\ndate: 2024-01-01\n---\nFile body",
        )
        .unwrap();
        fs::write(
            content.join("draft.md"),
            "---\ntitle: Draft post\ndate: 2024-01-02\ndraft: true\n---\nNot yet",
        )
        .unwrap();

        let store = MemoryPostStore::with_posts(vec![DatabasePost {
            id: "1".to_string(),
            slug: "from-db".to_string(),
            title: "From the database".to_string(),
            description: Some("Stored remotely".to_string()),
            author: String::new(),
            content: "Database body".to_string(),
            draft: false,
            created_at: "2024-02-01T00:00:00Z".to_string(),
            updated_at: "2024-02-01T00:00:00Z".to_string(),
            date: "2024-02-01T00:00:00Z".to_string(),
        }]);

        Blog::with_store(dir, config, Arc::new(store)).unwrap()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_listing_route() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(blog(dir.path(), BlogConfig::default()), false);

        let (status, body) = get(app, "/blog").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("From a file"));
        assert!(body.contains("From the database"));
        assert!(!body.contains("Draft post"));
    }

    #[tokio::test]
    async fn test_listing_route_with_drafts() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(blog(dir.path(), BlogConfig::default()), true);

        let (_, body) = get(app, "/blog").await;
        assert!(body.contains("Draft post"));
    }

    #[tokio::test]
    async fn test_post_routes() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(blog(dir.path(), BlogConfig::default()), false);

        let (status, body) = get(app.clone(), "/blog/from-db").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Database body"));

        let (status, body) = get(app.clone(), "/blog/from-file").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("File body"));

        let (status, body) = get(app, "/blog/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Post Not Found"));
    }

    #[tokio::test]
    async fn test_metadata_routes() {
        let dir = tempfile::tempdir().unwrap();
        let config = BlogConfig {
            title: "Notes".to_string(),
            ..Default::default()
        };
        let app = router(blog(dir.path(), config), false);

        let (status, body) = get(app.clone(), "/api/metadata").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Notes");

        let (status, body) = get(app.clone(), "/api/metadata/from-db").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "From the database | Notes");
        assert_eq!(json["openGraph"]["type"], "article");

        let (status, body) = get(app, "/api/metadata/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Post Not Found | Notes");
    }

    #[tokio::test]
    async fn test_root_base_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = BlogConfig {
            base_path: "/".to_string(),
            ..Default::default()
        };
        let app = router(blog(dir.path(), config), false);

        let (status, body) = get(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"href="/from-file""#));

        let (status, _) = get(app, "/from-file").await;
        assert_eq!(status, StatusCode::OK);
    }
}
