//! Naver open-API search client
//!
//! One synchronous call per keyword per request, no retries or caching.
//! Handlers depend on the [`SearchProvider`] trait rather than on the
//! concrete client so tests can substitute a canned provider.

use crate::config::ServerConfig;
use crate::error::UpstreamError;
use async_trait::async_trait;
use serde::Deserialize;

const NEWS_ENDPOINT: &str = "https://openapi.naver.com/v1/search/news.json";
const BOOK_ENDPOINT: &str = "https://openapi.naver.com/v1/search/book.json";

/// Upstream paging cap: results past this offset wrap back to the start.
pub const START_MAX: u32 = 1000;
/// Largest per-call result count the upstream accepts.
pub const DISPLAY_MAX: u32 = 100;
/// Result count used when the client sends none or an unusable value.
pub const DISPLAY_DEFAULT: u32 = 10;

/// Which upstream vertical a content request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// News article search
    News,
    /// Book description search
    Book,
}

impl Category {
    /// Parse the `category` query parameter value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "news" => Some(Category::News),
            "book" => Some(Category::Book),
            _ => None,
        }
    }

    /// Korean display label used in the response body.
    pub fn label(self) -> &'static str {
        match self {
            Category::News => "뉴스",
            Category::Book => "도서",
        }
    }

    fn endpoint(self) -> &'static str {
        match self {
            Category::News => NEWS_ENDPOINT,
            Category::Book => BOOK_ENDPOINT,
        }
    }
}

/// One item of the upstream search envelope.
///
/// News items carry `originallink` and `pubDate`; book items carry `image`.
/// Every field is defaulted so either vertical decodes into the same shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    /// Item title, may contain HTML markup and entities
    #[serde(default)]
    pub title: String,
    /// Item description, may contain HTML markup and entities
    #[serde(default)]
    pub description: String,
    /// Publication date string as the upstream formats it
    #[serde(default, rename = "pubDate")]
    pub pub_date: String,
    /// Publisher's own URL for the article (news only)
    #[serde(default)]
    pub originallink: String,
    /// Naver-hosted link for the item
    #[serde(default)]
    pub link: String,
    /// Cover image URL (book only)
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Seam between the content handler and the upstream search API
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch up to `display` items for one keyword starting at `start`.
    async fn search(
        &self,
        category: Category,
        keyword: &str,
        start: u32,
        display: u32,
    ) -> Result<Vec<SearchItem>, UpstreamError>;
}

/// reqwest-backed [`SearchProvider`] for the Naver open API
pub struct NaverClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl NaverClient {
    /// Build a client with the configured credentials and timeout.
    pub fn new(config: &ServerConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|err| UpstreamError::Request(err.to_string()))?;
        Ok(NaverClient {
            http,
            client_id: config.naver_client_id.clone(),
            client_secret: config.naver_client_secret.clone(),
        })
    }
}

#[async_trait]
impl SearchProvider for NaverClient {
    async fn search(
        &self,
        category: Category,
        keyword: &str,
        start: u32,
        display: u32,
    ) -> Result<Vec<SearchItem>, UpstreamError> {
        let response = self
            .http
            .get(category.endpoint())
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(&[
                ("query", keyword),
                ("start", &start.to_string()),
                ("display", &display.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: SearchEnvelope = response.json().await?;
        tracing::debug!(
            keyword,
            count = envelope.items.len(),
            "upstream search returned"
        );
        Ok(envelope.items)
    }
}
