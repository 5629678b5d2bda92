use tscope_derive::api_model;

/// Headline shown on the trusted and search lists.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Headline {
    /// Article title
    pub headline: String,
    /// Article link; empty when the provider gave none
    pub url: String,
}

/// An entry of the trusted RSS cache.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct TrustedItem {
    /// Feed URL the entry came from
    pub source: String,
    pub headline: String,
    pub link: String,
    /// Published date (RFC 2822) or the fetch time (RFC 3339)
    pub timestamp: String,
}

/// Article as returned by provider search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Article {
    /// Drops articles without a usable title.
    #[must_use]
    pub fn into_headline(self) -> Option<Headline> {
        let headline = self.title.filter(|t| !t.trim().is_empty())?;
        Some(Headline { headline, url: self.url.unwrap_or_default() })
    }

    /// `"{title} ({url})"`, the evidence line format.
    #[must_use]
    pub fn evidence_line(&self) -> String {
        format!(
            "{} ({})",
            self.title.as_deref().unwrap_or_default(),
            self.url.as_deref().unwrap_or_default()
        )
    }
}
