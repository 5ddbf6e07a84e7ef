//! Hosted database adapter
//!
//! Talks to the post table through its PostgREST interface:
//! `GET <endpoint>?select=*&order=date.desc` for listings,
//! `GET <endpoint>?select=*&slug=eq.<slug>&limit=1` for lookups and
//! `POST <endpoint>` with `Prefer: return=representation` for inserts.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

use super::{DatabasePost, NewPost, PostStore, StoreError};
use crate::config::DatabaseConfig;
use crate::helpers::encode_segment;

/// Post store backed by the hosted database's REST interface
#[derive(Debug, Clone)]
pub struct RestPostStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RestPostStore {
    /// Create a store for a table endpoint such as
    /// `https://project.supabase.co/rest/v1/blog_posts`
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let api_key = config.resolve_api_key().unwrap_or_else(|| {
            tracing::warn!("No database API key configured; requests will be anonymous");
            String::new()
        });
        Self::new(
            config.endpoint(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch_rows(&self, url: &str) -> Result<Vec<DatabasePost>, StoreError> {
        tracing::debug!("GET {}", url);
        let response = self.request(Method::GET, url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PostStore for RestPostStore {
    async fn list_posts(&self) -> Result<Vec<DatabasePost>, StoreError> {
        let url = format!("{}?select=*&order=date.desc", self.endpoint);
        self.fetch_rows(&url).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<DatabasePost>, StoreError> {
        let url = format!(
            "{}?select=*&slug=eq.{}&limit=1",
            self.endpoint,
            encode_segment(slug)
        );
        Ok(self.fetch_rows(&url).await?.into_iter().next())
    }

    async fn insert_post(&self, post: NewPost) -> Result<DatabasePost, StoreError> {
        let insert = post.into_insert(Utc::now());
        tracing::debug!("POST {} (slug {})", self.endpoint, insert.slug);

        let response = self
            .request(Method::POST, &self.endpoint)
            .header("Prefer", "return=representation")
            .json(&insert)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let rows: Vec<DatabasePost> = response.json().await?;

        rows.into_iter().next().ok_or(StoreError::EmptyInsert)
    }
}

/// Turn a non-2xx response into `StoreError::Status`, keeping the body
async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}
