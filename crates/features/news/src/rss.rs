use crate::error::{NewsError, NewsErrorExt};
use crate::model::Headline;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;

/// One syndicated entry, reduced to what the service uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// RFC 2822 publication date, when the feed carries one.
    pub published: Option<String>,
}

impl FeedEntry {
    #[must_use]
    pub fn into_headline(self) -> Headline {
        Headline { headline: self.title, url: self.link }
    }
}

/// Downloads and parses syndication feeds.
#[async_trait]
pub trait FeedFetcher: Debug + Send + Sync {
    /// Entries in document order; untitled entries are skipped.
    ///
    /// # Errors
    /// Transport failures, non-success statuses and malformed feeds.
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, NewsError>;
}

/// RSS 0.9-2.0 and Atom over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    http: Client,
    timeout: Duration,
}

impl HttpFeedFetcher {
    #[must_use]
    pub const fn new(http: Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, NewsError> {
        let body = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context(format!("GET {url}"))?
            .bytes()
            .await
            .context(format!("Reading {url}"))?;

        parse_feed(&body).context(url.to_owned())
    }
}

/// Parses an RSS or Atom document.
///
/// # Errors
/// [`NewsError::Feed`] when the payload is not a feed.
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedEntry>, NewsError> {
    let feed = feed_rs::parser::parse(body)?;

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title.map(|t| t.content.trim().to_owned()).filter(|t| !t.is_empty())?;
            let link = entry.links.into_iter().next().map(|l| l.href).unwrap_or_default();
            let published = entry.published.or(entry.updated).map(|at| at.to_rfc2822());
            Some(FeedEntry { title, link, published })
        })
        .collect())
}
