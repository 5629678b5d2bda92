use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Every configuration section of the service.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub news: NewsConfig,
    pub factcheck: FactCheckConfig,
    pub llm: LlmConfig,
    pub media: MediaConfig,
}

/// Arc-wrapped configuration, cheap to clone into handlers and tasks.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
    /// Seconds in-flight requests get to finish after a shutdown signal.
    pub shutdown_grace_secs: u64,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Static assets served for every unmatched GET.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
    /// Explicit filter directives; overrides `RUST_LOG` when set.
    pub filter: Option<String>,
    pub console: bool,
    /// Rolling log files are written here when set.
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// Headline providers and the trusted RSS cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub news_api_key: Option<String>,
    pub gnews_api_key: Option<String>,
    pub news_api_url: String,
    pub gnews_url: String,
    pub default_country: String,
    pub headlines_page_size: u32,
    pub search_page_size: u32,
    pub evidence_page_size: u32,
    pub headlines_timeout_secs: u64,
    pub search_timeout_secs: u64,
    pub evidence_timeout_secs: u64,
    pub search_cache_ttl_secs: u64,
    pub search_cache_capacity: u64,
    pub rss: RssConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RssConfig {
    /// Feeds mirrored into the trusted cache used for fact-checking.
    pub trusted_feeds: Vec<String>,
    /// Feeds used when no API provider returned headlines.
    pub fallback_feeds: Vec<String>,
    pub fallback_entries_per_feed: usize,
    /// Upper bound of cached trusted items; oldest are evicted first.
    pub cache_capacity: usize,
    /// How many of the newest cached items the stream view returns.
    pub stream_window: usize,
    /// Background refresh period; `0` disables the refresher.
    pub refresh_interval_secs: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FactCheckConfig {
    /// Minimum token-set similarity (exclusive, 0-100) for an RSS headline to count as evidence.
    pub match_threshold: f64,
}

/// OpenAI-compatible chat model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub fallback_model: Option<String>,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub upload_dir: PathBuf,
    pub allowed_extensions: Vec<String>,
    /// Pause before a verdict is produced.
    pub processing_delay_ms: u64,
    pub max_upload_bytes: usize,
}

impl NewsConfig {
    #[must_use]
    pub const fn headlines_timeout(&self) -> Duration {
        Duration::from_secs(self.headlines_timeout_secs)
    }

    #[must_use]
    pub const fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    #[must_use]
    pub const fn evidence_timeout(&self) -> Duration {
        Duration::from_secs(self.evidence_timeout_secs)
    }
}

impl MediaConfig {
    /// Case-insensitive extension check against the allow-list.
    #[must_use]
    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

/// Treats blank strings as absent keys.
#[must_use]
pub fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            ssl: None,
            shutdown_grace_secs: 30,
        }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { static_dir: PathBuf::from("public") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            console: true,
            dir: None,
            json: false,
            max_files: 10,
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            gnews_api_key: None,
            news_api_url: "https://newsapi.org/v2".to_owned(),
            gnews_url: "https://gnews.io/api/v4".to_owned(),
            default_country: "us".to_owned(),
            headlines_page_size: 10,
            search_page_size: 10,
            evidence_page_size: 5,
            headlines_timeout_secs: 6,
            search_timeout_secs: 10,
            evidence_timeout_secs: 8,
            search_cache_ttl_secs: 60,
            search_cache_capacity: 1_000,
            rss: RssConfig::default(),
        }
    }
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            trusted_feeds: [
                "http://feeds.reuters.com/reuters/worldNews",
                "http://feeds.reuters.com/reuters/businessNews",
                "https://feeds.bbci.co.uk/news/rss.xml",
                "https://feeds.bbci.co.uk/news/world/rss.xml",
                "https://feeds.bbci.co.uk/news/uk/rss.xml",
                "https://feeds.bbci.co.uk/news/technology/rss.xml",
                "https://feeds.bbci.co.uk/news/politics/rss.xml",
                "https://feeds.bbci.co.uk/news/us_and_canada/rss.xml",
                "https://feeds.bbci.co.uk/news/business/rss.xml",
                "https://www.aljazeera.com/xml/rss/all.xml",
                "https://www.who.int/feeds/entity/mediacentre/news/en/rss.xml",
            ]
            .map(str::to_owned)
            .to_vec(),
            fallback_feeds: [
                "https://feeds.bbci.co.uk/news/world/rss.xml",
                "http://feeds.reuters.com/reuters/worldNews",
                "https://www.aljazeera.com/xml/rss/all.xml",
            ]
            .map(str::to_owned)
            .to_vec(),
            fallback_entries_per_feed: 5,
            cache_capacity: 1_000,
            stream_window: 15,
            refresh_interval_secs: 300,
            timeout_secs: 10,
        }
    }
}

impl Default for FactCheckConfig {
    fn default() -> Self {
        Self { match_threshold: 60.0 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_owned(),
            model: "gpt-4o-mini".to_owned(),
            fallback_model: Some("gpt-3.5-turbo".to_owned()),
            max_tokens: 512,
            timeout_secs: 60,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            allowed_extensions: ["mp4", "avi", "mov", "jpg", "jpeg", "png"]
                .map(str::to_owned)
                .to_vec(),
            processing_delay_ms: 5_000,
            max_upload_bytes: 100 * 1024 * 1024,
        }
    }
}
