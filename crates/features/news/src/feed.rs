use crate::model::TrustedItem;
use crate::rss::FeedFetcher;
use fxhash::FxHashSet;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Cache {
    items: VecDeque<TrustedItem>,
    headlines: FxHashSet<String>,
}

impl Cache {
    /// Appends unless the headline is already cached; evicts the oldest item past `capacity`.
    fn insert(&mut self, item: TrustedItem, capacity: usize) -> bool {
        if !self.headlines.insert(item.headline.clone()) {
            return false;
        }
        self.items.push_back(item);
        while self.items.len() > capacity {
            if let Some(evicted) = self.items.pop_front() {
                self.headlines.remove(&evicted.headline);
            }
        }
        true
    }
}

#[derive(Debug)]
struct TrustedFeedInner {
    fetcher: Arc<dyn FeedFetcher>,
    urls: Vec<String>,
    capacity: usize,
    cache: RwLock<Cache>,
}

/// In-memory mirror of the trusted RSS feeds, deduplicated by headline.
///
/// Cloning is cheap and every clone shares the same cache.
#[derive(Debug, Clone)]
pub struct TrustedFeed {
    inner: Arc<TrustedFeedInner>,
}

impl TrustedFeed {
    #[must_use]
    pub fn new(fetcher: Arc<dyn FeedFetcher>, urls: Vec<String>, capacity: usize) -> Self {
        Self {
            inner: Arc::new(TrustedFeedInner {
                fetcher,
                urls,
                capacity: capacity.max(1),
                cache: RwLock::new(Cache::default()),
            }),
        }
    }

    /// Fetches every trusted feed and caches entries with unseen headlines.
    ///
    /// Failing or empty feeds are skipped. Returns the newly cached items.
    pub async fn refresh(&self) -> Vec<TrustedItem> {
        let mut fetched = Vec::new();
        for url in &self.inner.urls {
            match self.inner.fetcher.fetch(url).await {
                Ok(entries) if entries.is_empty() => debug!(feed = %url, "Feed has no entries"),
                Ok(entries) => fetched.push((url, entries)),
                Err(err) => warn!(feed = %url, error = %err, "Skipping trusted feed"),
            }
        }

        let fetched_at = chrono::Utc::now().to_rfc3339();
        let mut added = Vec::new();
        {
            let mut cache = self.inner.cache.write();
            for (url, entries) in fetched {
                for entry in entries {
                    let item = TrustedItem {
                        source: url.clone(),
                        headline: entry.title,
                        link: entry.link,
                        timestamp: entry.published.unwrap_or_else(|| fetched_at.clone()),
                    };
                    if cache.insert(item.clone(), self.inner.capacity) {
                        added.push(item);
                    }
                }
            }
        }

        if !added.is_empty() {
            info!(added = added.len(), cached = self.len(), "Trusted feed refreshed");
        }
        added
    }

    /// The newest `n` items, oldest first.
    #[must_use]
    pub fn latest(&self, n: usize) -> Vec<TrustedItem> {
        let cache = self.inner.cache.read();
        let skip = cache.items.len().saturating_sub(n);
        cache.items.iter().skip(skip).cloned().collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<TrustedItem> {
        self.inner.cache.read().items.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.cache.read().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
