//! Trending keywords from the Google Trends RSS feed
//!
//! Feed item titles arrive as `키워드 - 트렌드`; only the part before the
//! separator is a keyword. Random selection takes a caller-supplied RNG so
//! there is no process-global seeded state.

use crate::config::ServerConfig;
use crate::error::UpstreamError;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

/// Keywords returned when the client does not send `count`.
pub const DEFAULT_TREND_COUNT: usize = 5;

/// Seam between the trending handler and the RSS feed
#[async_trait]
pub trait TrendProvider: Send + Sync {
    /// Fetch the current trending keywords in feed order.
    async fn trending_keywords(&self) -> Result<Vec<String>, UpstreamError>;
}

/// reqwest + rss backed [`TrendProvider`]
pub struct GoogleTrendsClient {
    http: reqwest::Client,
    feed_url: String,
}

impl GoogleTrendsClient {
    /// Build a client for the configured feed URL.
    pub fn new(config: &ServerConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|err| UpstreamError::Request(err.to_string()))?;
        Ok(GoogleTrendsClient {
            http,
            feed_url: config.trends_feed_url.clone(),
        })
    }
}

#[async_trait]
impl TrendProvider for GoogleTrendsClient {
    async fn trending_keywords(&self) -> Result<Vec<String>, UpstreamError> {
        let response = self.http.get(&self.feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let channel = rss::Channel::read_from(&body[..])
            .map_err(|err| UpstreamError::FeedParse(err.to_string()))?;

        let keywords: Vec<String> = channel
            .items()
            .iter()
            .filter_map(|item| item.title())
            .filter_map(extract_keyword)
            .collect();
        tracing::debug!(count = keywords.len(), "trend feed parsed");
        Ok(keywords)
    }
}

/// Extract the keyword from a feed item title (`키워드 - 트렌드`).
///
/// Returns `None` for titles that are empty after trimming.
pub fn extract_keyword(title: &str) -> Option<String> {
    let keyword = title.split(" - ").next().unwrap_or(title).trim();
    if keyword.is_empty() {
        None
    } else {
        Some(keyword.to_string())
    }
}

/// Pick one keyword uniformly at random from `keywords`.
pub fn pick_random<'a, R: Rng + ?Sized>(keywords: &'a [String], rng: &mut R) -> Option<&'a str> {
    keywords.choose(rng).map(String::as_str)
}
