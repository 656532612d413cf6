//! HTTP routes and handlers
//!
//! Three GET endpoints: `/api/content` (search → normalize → segment),
//! `/api/trending` (RSS keyword list, optional random pick), and
//! `/healthz`. Query parameters are parsed leniently the way the original
//! contract defines: unusable numbers fall back to defaults, while a
//! missing `query` or unknown `category` is a 400.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::naver::{Category, SearchItem, SearchProvider, DISPLAY_DEFAULT, DISPLAY_MAX, START_MAX};
use crate::trending::{pick_random, TrendProvider, DEFAULT_TREND_COUNT};
use tipo_text::{normalize, segment};

/// Shared handler state: the two upstream provider seams
#[derive(Clone)]
pub struct AppState {
    /// Search API provider
    pub search: Arc<dyn SearchProvider>,
    /// Trend feed provider
    pub trends: Arc<dyn TrendProvider>,
}

/// Build the application router with tracing attached.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/content", get(content))
        .route("/api/trending", get(trending))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// One content item in the `/api/content` response
#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    /// Normalized item title
    pub title: String,
    /// Host of the publisher link, empty when unknown
    pub source: String,
    /// The keyword this item was fetched for
    pub keyword: String,
    /// Korean category label (`뉴스` / `도서`)
    pub category: String,
    /// Cover image URL; omitted when the item has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Upstream publication date string
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    /// Normalized, segmented description sentences
    pub sentences: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    query: Option<String>,
    start: Option<String>,
    display: Option<String>,
    category: Option<String>,
}

#[derive(Debug)]
struct ContentParams {
    keywords: Vec<String>,
    start: u32,
    display: u32,
    category: Category,
}

impl ContentQuery {
    fn into_params(self) -> Result<ContentParams, ApiError> {
        let raw_query = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ApiError::missing_param("query"))?;

        let keywords: Vec<String> = raw_query
            .split(',')
            .map(str::trim)
            .filter(|kw| !kw.is_empty())
            .map(str::to_string)
            .collect();
        if keywords.is_empty() {
            return Err(ApiError::invalid_param(
                "query",
                "must contain at least one keyword",
            ));
        }

        // Unusable numbers fall back to defaults rather than erroring, and
        // offsets past the upstream cap wrap around to the first page.
        let start = match parse_positive(self.start.as_deref()) {
            Some(start) if start <= START_MAX => start,
            _ => 1,
        };
        let display = match parse_positive(self.display.as_deref()) {
            Some(display) if display <= DISPLAY_MAX => display,
            _ => DISPLAY_DEFAULT,
        };

        let category = match self.category.as_deref() {
            None => Category::News,
            Some(raw) => Category::parse(raw)
                .ok_or_else(|| ApiError::invalid_param("category", "must be 'news' or 'book'"))?,
        };

        Ok(ContentParams {
            keywords,
            start,
            display,
            category,
        })
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
}

/// Split the `display` budget across `keyword_count` keywords: an even base
/// share each, with the remainder going one extra to the first keywords.
fn allocate_budget(display: u32, keyword_count: usize) -> Vec<u32> {
    let n = keyword_count as u32;
    let base = display / n;
    let remainder = display % n;
    (0..n)
        .map(|idx| if idx < remainder { base + 1 } else { base })
        .collect()
}

/// Interleave per-keyword batches round-robin, truncated to `display`.
fn assemble_responses(
    keywords: &[String],
    batches: Vec<Vec<SearchItem>>,
    display: u32,
    category: Category,
) -> Vec<ContentResponse> {
    let deepest = batches.iter().map(Vec::len).max().unwrap_or(0);
    let mut responses = Vec::new();
    'outer: for depth in 0..deepest {
        for (keyword, batch) in keywords.iter().zip(&batches) {
            let Some(item) = batch.get(depth) else {
                continue;
            };
            responses.push(to_response(item, keyword, category));
            if responses.len() >= display as usize {
                break 'outer;
            }
        }
    }
    responses
}

fn to_response(item: &SearchItem, keyword: &str, category: Category) -> ContentResponse {
    let description = normalize(&item.description);
    let publisher_link = if item.originallink.is_empty() {
        &item.link
    } else {
        &item.originallink
    };
    ContentResponse {
        title: normalize(&item.title),
        source: source_host(publisher_link),
        keyword: keyword.to_string(),
        category: category.label().to_string(),
        image: (!item.image.is_empty()).then(|| item.image.clone()),
        pub_date: item.pub_date.clone(),
        sentences: segment(&description),
    }
}

/// Host component of a publisher URL; empty when the URL does not parse.
fn source_host(link: &str) -> String {
    url::Url::parse(link)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default()
}

async fn content(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    let params = query.into_params()?;
    let allocation = allocate_budget(params.display, params.keywords.len());

    let mut batches: Vec<Vec<SearchItem>> = Vec::with_capacity(params.keywords.len());
    for (keyword, quota) in params.keywords.iter().zip(allocation) {
        if quota == 0 {
            batches.push(Vec::new());
            continue;
        }
        let items = state
            .search
            .search(params.category, keyword, params.start, quota)
            .await?;
        batches.push(items);
    }

    let responses = assemble_responses(
        &params.keywords,
        batches,
        params.display,
        params.category,
    );
    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
struct TrendingQuery {
    count: Option<String>,
    random: Option<String>,
}

impl TrendingQuery {
    fn wants_random(&self) -> bool {
        self.random.as_deref() == Some("true")
    }

    fn count(&self) -> usize {
        self.count
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|count| *count >= 1)
            .unwrap_or(DEFAULT_TREND_COUNT)
    }
}

#[derive(Debug, Serialize)]
struct RandomKeywordResponse<'a> {
    keyword: &'a str,
}

async fn trending(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<Response, ApiError> {
    let mut keywords = state.trends.trending_keywords().await?;

    if query.wants_random() {
        // RNG is constructed at the call site; nothing process-global.
        let mut rng = rand::thread_rng();
        if let Some(keyword) = pick_random(&keywords, &mut rng) {
            return Ok(Json(RandomKeywordResponse { keyword }).into_response());
        }
        // Empty feed: fall through to the (empty) list response.
    }

    keywords.truncate(query.count());
    Ok(Json(keywords).into_response())
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn healthz() -> impl IntoResponse {
    Json(HealthzResponse { status: "ok" })
}
