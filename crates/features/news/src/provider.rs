//! Headline providers: NewsAPI and GNews.
//!
//! Both providers answer with a JSON envelope even on errors, so responses are
//! decoded regardless of the HTTP status and an error envelope simply yields
//! no articles.

use crate::error::{NewsError, NewsErrorExt};
use crate::model::{Article, Headline};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, warn};

/// Parameters of a keyword article search.
#[derive(Debug, Clone, Copy)]
pub struct ArticleQuery<'a> {
    pub text: &'a str,
    pub limit: u32,
    /// ISO language code filter, when the provider supports it.
    pub language: Option<&'a str>,
    /// Provider-specific ordering (`relevancy` for NewsAPI).
    pub sort_by: Option<&'a str>,
    pub timeout: Duration,
}

/// A remote news provider.
#[async_trait]
pub trait HeadlineSource: Debug + Send + Sync {
    /// Human-readable provider name, used in evidence error lines.
    fn label(&self) -> &'static str;

    /// Top headlines for `country`; untitled articles are skipped.
    ///
    /// # Errors
    /// Transport failures and undecodable responses.
    async fn top_headlines(
        &self,
        country: &str,
        limit: u32,
        timeout: Duration,
    ) -> Result<Vec<Headline>, NewsError>;

    /// Keyword search.
    ///
    /// # Errors
    /// Transport failures and undecodable responses.
    async fn search(&self, query: &ArticleQuery<'_>) -> Result<Vec<Article>, NewsError>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    message: Option<String>,
}

async fn get_envelope(
    http: &Client,
    url: String,
    params: &[(&str, String)],
    timeout: Duration,
) -> Result<Envelope, NewsError> {
    let response = http.get(url).query(params).timeout(timeout).send().await?;
    let status = response.status();
    let envelope: Envelope = response.json().await?;
    if !status.is_success() {
        debug!(%status, message = envelope.message.as_deref().unwrap_or_default(), "Provider returned an error envelope");
    }
    Ok(envelope)
}

fn headlines(articles: Vec<Article>) -> Vec<Headline> {
    articles.into_iter().filter_map(Article::into_headline).collect()
}

/// <https://newsapi.org> client.
#[derive(Debug, Clone)]
pub struct NewsApi {
    http: Client,
    base_url: String,
    api_key: String,
}

impl NewsApi {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url, api_key: api_key.into() }
    }
}

#[async_trait]
impl HeadlineSource for NewsApi {
    fn label(&self) -> &'static str {
        "NewsAPI"
    }

    async fn top_headlines(
        &self,
        country: &str,
        limit: u32,
        timeout: Duration,
    ) -> Result<Vec<Headline>, NewsError> {
        let params = [
            ("country", country.to_owned()),
            ("language", "en".to_owned()),
            ("pageSize", limit.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        let envelope =
            get_envelope(&self.http, format!("{}/top-headlines", self.base_url), &params, timeout)
                .await
                .context("NewsAPI top-headlines")?;

        if envelope.status.as_deref() != Some("ok") {
            warn!(
                status = envelope.status.as_deref().unwrap_or("missing"),
                message = envelope.message.as_deref().unwrap_or_default(),
                "NewsAPI top-headlines not ok"
            );
            return Ok(Vec::new());
        }
        Ok(headlines(envelope.articles))
    }

    async fn search(&self, query: &ArticleQuery<'_>) -> Result<Vec<Article>, NewsError> {
        let mut params = vec![("q", query.text.to_owned())];
        if let Some(language) = query.language {
            params.push(("language", language.to_owned()));
        }
        if let Some(sort_by) = query.sort_by {
            params.push(("sortBy", sort_by.to_owned()));
        }
        params.push(("pageSize", query.limit.to_string()));
        params.push(("apiKey", self.api_key.clone()));

        let envelope =
            get_envelope(&self.http, format!("{}/everything", self.base_url), &params, query.timeout)
                .await
                .context("NewsAPI everything")?;
        Ok(envelope.articles)
    }
}

/// <https://gnews.io> client.
#[derive(Debug, Clone)]
pub struct GNews {
    http: Client,
    base_url: String,
    token: String,
}

impl GNews {
    pub fn new(http: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url, token: token.into() }
    }
}

#[async_trait]
impl HeadlineSource for GNews {
    fn label(&self) -> &'static str {
        "GNews API"
    }

    async fn top_headlines(
        &self,
        country: &str,
        _limit: u32,
        timeout: Duration,
    ) -> Result<Vec<Headline>, NewsError> {
        // GNews applies its own page size here.
        let params = [
            ("country", country.to_owned()),
            ("lang", "en".to_owned()),
            ("token", self.token.clone()),
        ];
        let envelope =
            get_envelope(&self.http, format!("{}/top-headlines", self.base_url), &params, timeout)
                .await
                .context("GNews top-headlines")?;
        Ok(headlines(envelope.articles))
    }

    async fn search(&self, query: &ArticleQuery<'_>) -> Result<Vec<Article>, NewsError> {
        let mut params = vec![("q", query.text.to_owned())];
        if let Some(language) = query.language {
            params.push(("lang", language.to_owned()));
        }
        params.push(("max", query.limit.to_string()));
        params.push(("token", self.token.clone()));

        let envelope =
            get_envelope(&self.http, format!("{}/search", self.base_url), &params, query.timeout)
                .await
                .context("GNews search")?;
        Ok(envelope.articles)
    }
}
