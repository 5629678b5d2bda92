#![cfg(feature = "server")]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use tscope_domain::config::ApiConfig;
use tscope_kernel::domain::registry::InitializedSlice;
use tscope_kernel::server::ApiState;
use tscope_news::{FeedEntry, FeedFetcher, News, NewsError, NewsSources};

#[derive(Debug)]
struct OneFeed;

#[async_trait::async_trait]
impl FeedFetcher for OneFeed {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, NewsError> {
        Ok((0..20)
            .map(|i| FeedEntry { title: format!("{url} {i}"), link: format!("{url}/{i}"), published: None })
            .collect())
    }
}

fn app(register: bool) -> axum::Router {
    let mut cfg = ApiConfig::default();
    cfg.news.rss.trusted_feeds = vec!["trusted".into()];
    cfg.news.rss.fallback_feeds = vec!["fallback".into()];

    let news = News::with_sources(NewsSources { newsapi: None, gnews: None, feeds: Arc::new(OneFeed) }, &cfg.news);
    let mut builder = ApiState::builder().config(cfg);
    if register {
        builder = builder.register_slice(InitializedSlice::new(news));
    }
    let (router, _) = tscope_news::router().with_state(builder.build().unwrap()).split_for_parts();
    router
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn trusted_news_without_keys_serves_rss_fallback() {
    let (status, body) = get(app(true), "/trusted_news?country=gb").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(list[0]["headline"], "fallback 0");
    assert_eq!(list[0]["url"], "fallback/0");
}

#[tokio::test]
async fn search_without_key_is_empty() {
    let (status, body) = get(app(true), "/search_news?q=climate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));

    let (status, _) = get(app(true), "/search_news").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn trusted_feed_returns_latest_window() {
    let (status, body) = get(app(true), "/trusted_feed").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 15);
    assert_eq!(list[0]["headline"], "trusted 5");
    assert_eq!(list[14]["source"], "trusted");
}

#[tokio::test]
async fn missing_slice_is_a_server_error() {
    let (status, body) = get(app(false), "/trusted_news").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("News"));
}
