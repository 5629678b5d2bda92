//! News feature slice: trusted headlines, keyword search and the trusted RSS cache.
//!
//! Headlines come from NewsAPI, then GNews, then a handful of RSS feeds. The
//! trusted cache mirrors a longer list of outlet feeds and backs fact-checking.

mod error;
mod feed;
#[cfg(feature = "server")]
mod handlers;
mod model;
mod provider;
mod refresher;
mod rss;
mod service;

pub use crate::error::{NewsError, NewsErrorExt};
pub use crate::feed::TrustedFeed;
#[cfg(feature = "server")]
pub use crate::handlers::router;
pub use crate::model::{Article, Headline, TrustedItem};
pub use crate::provider::{ArticleQuery, GNews, HeadlineSource, NewsApi};
pub use crate::refresher::spawn_refresher;
pub use crate::rss::{FeedEntry, FeedFetcher, HttpFeedFetcher, parse_feed};
pub use crate::service::{NewsService, NewsSources};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tscope_domain::config::{NewsConfig, non_blank};
use tscope_kernel::domain::registry::InitializedSlice;

const USER_AGENT: &str = concat!("TruthScope/", env!("CARGO_PKG_VERSION"));

/// News feature state
#[tscope_derive::feature_slice]
pub struct News {
    pub service: NewsService,
    pub feed: TrustedFeed,
    /// Size of the `/trusted_feed` window.
    pub stream_window: usize,
    refresh_interval: Duration,
}

impl NewsSources {
    /// HTTP-backed sources; providers without a key are left out.
    ///
    /// # Errors
    /// [`NewsError::Http`] when the HTTP client cannot be built.
    pub fn from_config(cfg: &NewsConfig) -> Result<Self, NewsError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Building news HTTP client")?;

        let newsapi = non_blank(cfg.news_api_key.as_ref()).map(|key| {
            Arc::new(NewsApi::new(http.clone(), &cfg.news_api_url, key)) as Arc<dyn HeadlineSource>
        });
        let gnews = non_blank(cfg.gnews_api_key.as_ref()).map(|key| {
            Arc::new(GNews::new(http.clone(), &cfg.gnews_url, key)) as Arc<dyn HeadlineSource>
        });
        let feeds = Arc::new(HttpFeedFetcher::new(http, Duration::from_secs(cfg.rss.timeout_secs)));

        Ok(Self { newsapi, gnews, feeds })
    }
}

impl News {
    /// Builds the slice around the given upstreams.
    #[must_use]
    pub fn with_sources(sources: NewsSources, cfg: &NewsConfig) -> Self {
        let feed = TrustedFeed::new(
            Arc::clone(&sources.feeds),
            cfg.rss.trusted_feeds.clone(),
            cfg.rss.cache_capacity,
        );

        Self::new(NewsInner {
            service: NewsService::new(sources, cfg),
            feed,
            stream_window: cfg.rss.stream_window,
            refresh_interval: Duration::from_secs(cfg.rss.refresh_interval_secs),
        })
    }

    /// Starts the background feed refresher unless the interval is zero.
    #[must_use]
    pub fn spawn_refresher(&self, shutdown: watch::Receiver<bool>) -> Option<JoinHandle<()>> {
        (!self.refresh_interval.is_zero())
            .then(|| spawn_refresher(self.feed.clone(), self.refresh_interval, shutdown))
    }
}

/// Builds the news slice from configuration.
///
/// # Errors
/// See [`NewsSources::from_config`].
pub fn build(cfg: &NewsConfig) -> Result<News, NewsError> {
    let sources = NewsSources::from_config(cfg)?;
    let news = News::with_sources(sources, cfg);

    tracing::info!(
        providers = news.service.providers().count(),
        trusted_feeds = cfg.rss.trusted_feeds.len(),
        "News slice initialized"
    );
    Ok(news)
}

/// Initializes the news feature.
///
/// # Errors
/// See [`build`].
pub fn init(cfg: &NewsConfig) -> Result<InitializedSlice, NewsError> {
    build(cfg).map(InitializedSlice::new)
}
