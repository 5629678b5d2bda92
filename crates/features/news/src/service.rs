use crate::error::{NewsError, NewsErrorExt};
use crate::model::{Article, Headline};
use crate::provider::{ArticleQuery, HeadlineSource};
use crate::rss::{FeedEntry, FeedFetcher};
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use tscope_domain::config::NewsConfig;

/// Upstream collaborators of [`NewsService`].
#[derive(Debug, Clone)]
pub struct NewsSources {
    pub newsapi: Option<Arc<dyn HeadlineSource>>,
    pub gnews: Option<Arc<dyn HeadlineSource>>,
    pub feeds: Arc<dyn FeedFetcher>,
}

/// Headline aggregation with a provider fallback chain.
#[derive(Debug, Clone)]
pub struct NewsService {
    sources: NewsSources,
    fallback_feeds: Vec<String>,
    fallback_entries_per_feed: usize,
    headlines_limit: u32,
    headlines_timeout: Duration,
    search_limit: u32,
    search_timeout: Duration,
    search_cache: Cache<String, Vec<Headline>>,
}

impl NewsService {
    #[must_use]
    pub fn new(sources: NewsSources, cfg: &NewsConfig) -> Self {
        let search_cache = Cache::builder()
            .max_capacity(cfg.search_cache_capacity)
            .time_to_live(Duration::from_secs(cfg.search_cache_ttl_secs))
            .build();

        Self {
            sources,
            fallback_feeds: cfg.rss.fallback_feeds.clone(),
            fallback_entries_per_feed: cfg.rss.fallback_entries_per_feed,
            headlines_limit: cfg.headlines_page_size,
            headlines_timeout: cfg.headlines_timeout(),
            search_limit: cfg.search_page_size,
            search_timeout: cfg.search_timeout(),
            search_cache,
        }
    }

    /// Configured providers in fallback order (NewsAPI, then GNews).
    pub fn providers(&self) -> impl Iterator<Item = &Arc<dyn HeadlineSource>> {
        self.sources.newsapi.iter().chain(self.sources.gnews.iter())
    }

    /// Top headlines from the first provider that returns any, else the RSS fallback.
    ///
    /// A provider error abandons the chain and goes straight to RSS.
    pub async fn trusted_headlines(&self, country: &str) -> Vec<Headline> {
        match self.provider_headlines(country).await {
            Ok(headlines) if !headlines.is_empty() => headlines,
            Ok(_) => {
                debug!(country, "No provider headlines, using RSS fallback");
                self.rss_fallback().await
            },
            Err(err) => {
                warn!(country, error = %err, "Trusted news fetch failed, using RSS fallback");
                self.rss_fallback().await
            },
        }
    }

    async fn provider_headlines(&self, country: &str) -> Result<Vec<Headline>, NewsError> {
        for provider in self.providers() {
            let headlines = provider
                .top_headlines(country, self.headlines_limit, self.headlines_timeout)
                .await
                .context(provider.label())?;
            if !headlines.is_empty() {
                debug!(provider = provider.label(), count = headlines.len(), "Provider headlines");
                return Ok(headlines);
            }
        }
        Ok(Vec::new())
    }

    /// The first entries of each fallback feed; unreachable feeds are skipped.
    pub async fn rss_fallback(&self) -> Vec<Headline> {
        let mut headlines = Vec::new();
        for url in &self.fallback_feeds {
            match self.sources.feeds.fetch(url).await {
                Ok(entries) => headlines.extend(
                    entries
                        .into_iter()
                        .take(self.fallback_entries_per_feed)
                        .map(FeedEntry::into_headline),
                ),
                Err(err) => warn!(feed = %url, error = %err, "Skipping fallback feed"),
            }
        }
        headlines
    }

    /// NewsAPI keyword search ordered by relevancy.
    ///
    /// Never fails: a missing key, a blank query or an upstream error yields
    /// an empty list. Successful results are cached per query.
    pub async fn search(&self, query: &str) -> Vec<Headline> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let Some(newsapi) = &self.sources.newsapi else {
            warn!("Search requested but no NewsAPI key is configured");
            return Vec::new();
        };
        if let Some(cached) = self.search_cache.get(query) {
            debug!(query, "Search cache hit");
            return cached;
        }

        let request = ArticleQuery {
            text: query,
            limit: self.search_limit,
            language: None,
            sort_by: Some("relevancy"),
            timeout: self.search_timeout,
        };
        match newsapi.search(&request).await {
            Ok(articles) => {
                let headlines: Vec<_> =
                    articles.into_iter().filter_map(Article::into_headline).collect();
                self.search_cache.insert(query.to_owned(), headlines.clone());
                headlines
            },
            Err(err) => {
                warn!(query, error = %err, "Search error");
                Vec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct FakeProvider {
        label: &'static str,
        headlines: Vec<&'static str>,
        failing: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HeadlineSource for FakeProvider {
        fn label(&self) -> &'static str {
            self.label
        }

        async fn top_headlines(&self, _: &str, _: u32, _: Duration) -> Result<Vec<Headline>, NewsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                return Err("upstream timeout".into());
            }
            Ok(self
                .headlines
                .iter()
                .map(|h| Headline { headline: (*h).to_owned(), url: format!("https://{h}") })
                .collect())
        }

        async fn search(&self, query: &ArticleQuery<'_>) -> Result<Vec<Article>, NewsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                return Err("upstream timeout".into());
            }
            assert_eq!(query.sort_by, Some("relevancy"));
            Ok(vec![
                Article { title: Some(format!("About {}", query.text)), url: None },
                Article { title: None, url: Some("https://untitled".into()) },
            ])
        }
    }

    #[derive(Debug)]
    struct FallbackFeeds;

    #[async_trait]
    impl FeedFetcher for FallbackFeeds {
        async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, NewsError> {
            if url.contains("down") {
                return Err("connection refused".into());
            }
            Ok((0..8)
                .map(|i| FeedEntry { title: format!("{url} #{i}"), link: String::new(), published: None })
                .collect())
        }
    }

    fn config() -> NewsConfig {
        let mut cfg = NewsConfig::default();
        cfg.rss.fallback_feeds = vec!["bbc".into(), "down".into(), "aljazeera".into()];
        cfg
    }

    fn service(newsapi: Option<FakeProvider>, gnews: Option<FakeProvider>) -> NewsService {
        let sources = NewsSources {
            newsapi: newsapi.map(|p| Arc::new(p) as Arc<dyn HeadlineSource>),
            gnews: gnews.map(|p| Arc::new(p) as Arc<dyn HeadlineSource>),
            feeds: Arc::new(FallbackFeeds),
        };
        NewsService::new(sources, &config())
    }

    #[tokio::test]
    async fn newsapi_headlines_win() {
        let news = service(
            Some(FakeProvider { label: "NewsAPI", headlines: vec!["a", "b"], ..Default::default() }),
            Some(FakeProvider { label: "GNews API", headlines: vec!["g"], ..Default::default() }),
        );

        let headlines = news.trusted_headlines("us").await;
        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].headline, "a");
    }

    #[tokio::test]
    async fn empty_newsapi_falls_through_to_gnews() {
        let news = service(
            Some(FakeProvider { label: "NewsAPI", ..Default::default() }),
            Some(FakeProvider { label: "GNews API", headlines: vec!["g"], ..Default::default() }),
        );

        let headlines = news.trusted_headlines("gb").await;
        assert_eq!(headlines, vec![Headline { headline: "g".into(), url: "https://g".into() }]);
    }

    #[tokio::test]
    async fn provider_error_goes_straight_to_rss() {
        let news = service(
            Some(FakeProvider { label: "NewsAPI", failing: true, ..Default::default() }),
            Some(FakeProvider { label: "GNews API", headlines: vec!["g"], ..Default::default() }),
        );

        let headlines = news.trusted_headlines("us").await;
        assert_eq!(headlines.len(), 10, "five from each reachable fallback feed");
        assert_eq!(headlines[0].headline, "bbc #0");
        assert_eq!(headlines[9].headline, "aljazeera #4");
    }

    #[tokio::test]
    async fn no_keys_uses_rss() {
        let news = service(None, None);
        assert_eq!(news.trusted_headlines("us").await.len(), 10);
        assert_eq!(news.providers().count(), 0);
    }

    #[tokio::test]
    async fn search_keeps_titled_articles_and_caches() {
        let newsapi = Arc::new(FakeProvider { label: "NewsAPI", ..Default::default() });
        let sources = NewsSources {
            newsapi: Some(newsapi.clone() as Arc<dyn HeadlineSource>),
            gnews: None,
            feeds: Arc::new(FallbackFeeds),
        };
        let news = NewsService::new(sources, &config());

        let first = news.search("solar").await;
        let second = news.search("solar").await;

        assert_eq!(first, vec![Headline { headline: "About solar".into(), url: String::new() }]);
        assert_eq!(first, second);
        assert_eq!(newsapi.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_degrades_to_empty() {
        assert!(service(None, None).search("solar").await.is_empty());

        let news = service(Some(FakeProvider { label: "NewsAPI", ..Default::default() }), None);
        assert!(news.search("   ").await.is_empty());

        let failing =
            service(Some(FakeProvider { label: "NewsAPI", failing: true, ..Default::default() }), None);
        assert!(failing.search("solar").await.is_empty());
        assert_eq!(failing.search_cache.get("solar"), None, "errors are not cached");
    }
}
