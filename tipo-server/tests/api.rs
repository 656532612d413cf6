//! End-to-end router tests with canned upstream providers

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use tipo_server::error::UpstreamError;
use tipo_server::naver::{Category, SearchItem, SearchProvider};
use tipo_server::routes::{build_router, AppState};
use tipo_server::trending::TrendProvider;

struct FixedSearchProvider {
    items_per_keyword: usize,
}

#[async_trait]
impl SearchProvider for FixedSearchProvider {
    async fn search(
        &self,
        _category: Category,
        keyword: &str,
        _start: u32,
        display: u32,
    ) -> Result<Vec<SearchItem>, UpstreamError> {
        let count = self.items_per_keyword.min(display as usize);
        Ok((0..count)
            .map(|idx| SearchItem {
                title: format!("<b>{keyword}</b> 기사 {idx}"),
                description: format!(
                    "[포토] 짧다. {keyword} 관련 소식이 전해지며 관심이 집중되고 있습니다."
                ),
                originallink: "https://press.example.com/a/1".to_string(),
                pub_date: "Mon, 01 Jul 2024 09:00:00 +0900".to_string(),
                ..SearchItem::default()
            })
            .collect())
    }
}

struct FailingSearchProvider;

#[async_trait]
impl SearchProvider for FailingSearchProvider {
    async fn search(
        &self,
        _category: Category,
        _keyword: &str,
        _start: u32,
        _display: u32,
    ) -> Result<Vec<SearchItem>, UpstreamError> {
        Err(UpstreamError::Status { status: 500 })
    }
}

struct FixedTrendProvider {
    keywords: Vec<&'static str>,
}

#[async_trait]
impl TrendProvider for FixedTrendProvider {
    async fn trending_keywords(&self) -> Result<Vec<String>, UpstreamError> {
        Ok(self.keywords.iter().map(|kw| kw.to_string()).collect())
    }
}

fn test_state(items_per_keyword: usize, trends: Vec<&'static str>) -> AppState {
    AppState {
        search: Arc::new(FixedSearchProvider { items_per_keyword }),
        trends: Arc::new(FixedTrendProvider { keywords: trends }),
    }
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
    let router = build_router(state);
    let response = router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, value)
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (status, body) = get_json(test_state(1, vec![]), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn content_requires_query_parameter() {
    let (status, body) = get_json(test_state(1, vec![]), "/api/content").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_parameter");
    assert!(body["message"].as_str().unwrap().contains("'query'"));
}

#[tokio::test]
async fn content_rejects_unknown_category() {
    let (status, _) = get_json(
        test_state(1, vec![]),
        "/api/content?query=IT&category=music",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn content_returns_cleaned_segmented_items() {
    let (status, body) = get_json(test_state(2, vec![]), "/api/content?query=IT&display=4").await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().expect("array response");
    assert_eq!(items.len(), 2);

    let first = &items[0];
    assert_eq!(first["title"], "IT 기사 0");
    assert_eq!(first["source"], "press.example.com");
    assert_eq!(first["keyword"], "IT");
    assert_eq!(first["category"], "뉴스");
    assert_eq!(first["pubDate"], "Mon, 01 Jul 2024 09:00:00 +0900");
    // Markup and the bracketed attribution are gone, and the short leading
    // fragment was merged into the following sentence.
    let sentences = first["sentences"].as_array().expect("sentences array");
    assert_eq!(sentences.len(), 1);
    let sentence = sentences[0].as_str().unwrap();
    assert!(sentence.starts_with("짧다. IT 관련"), "got {sentence:?}");
    assert!(!sentence.contains('['));
    // News items omit the image field entirely.
    assert!(first.get("image").is_none());
}

#[tokio::test]
async fn content_interleaves_multiple_keywords() {
    let (status, body) = get_json(
        test_state(3, vec![]),
        "/api/content?query=IT,%EA%B2%BD%EC%A0%9C&display=4",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let keywords: Vec<&str> = body
        .as_array()
        .expect("array response")
        .iter()
        .map(|item| item["keyword"].as_str().unwrap())
        .collect();
    // display=4 over two keywords: 2 each, interleaved round-robin.
    assert_eq!(keywords, vec!["IT", "경제", "IT", "경제"]);
}

#[tokio::test]
async fn content_maps_upstream_failure_to_bad_gateway() {
    let state = AppState {
        search: Arc::new(FailingSearchProvider),
        trends: Arc::new(FixedTrendProvider { keywords: vec![] }),
    };
    let (status, body) = get_json(state, "/api/content?query=IT").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_failure");
}

#[tokio::test]
async fn trending_returns_default_count() {
    let trends = vec!["하나", "둘", "셋", "넷", "다섯", "여섯", "일곱"];
    let (status, body) = get_json(test_state(1, trends), "/api/trending").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().expect("array response");
    assert_eq!(list.len(), 5);
    assert_eq!(list[0], "하나");
}

#[tokio::test]
async fn trending_honors_count_parameter() {
    let trends = vec!["하나", "둘", "셋"];
    let (_, body) = get_json(test_state(1, trends), "/api/trending?count=2").await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // A count beyond the feed size returns everything available.
    let trends = vec!["하나", "둘", "셋"];
    let (_, body) = get_json(test_state(1, trends), "/api/trending?count=10").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn trending_random_returns_single_keyword_object() {
    let trends = vec!["하나", "둘", "셋"];
    let (status, body) = get_json(test_state(1, trends.clone()), "/api/trending?random=true").await;
    assert_eq!(status, StatusCode::OK);
    let keyword = body["keyword"].as_str().expect("keyword field");
    assert!(trends.contains(&keyword));
}

#[tokio::test]
async fn trending_random_with_empty_feed_returns_empty_list() {
    let (status, body) = get_json(test_state(1, vec![]), "/api/trending?random=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array response").len(), 0);
}
