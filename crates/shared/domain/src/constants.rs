//! Names shared between crates.

/// `OpenAPI` tag for infrastructure endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for headline aggregation endpoints.
pub const NEWS_TAG: &str = "News";
/// `OpenAPI` tag for fact-check and assistant endpoints.
pub const FACTCHECK_TAG: &str = "Fact-check";
/// `OpenAPI` tag for media screening endpoints.
pub const MEDIA_TAG: &str = "Media";

/// Prefix of layered configuration environment variables (`TSCOPE__NEWS__...`).
pub const CONFIG_ENV_PREFIX: &str = "TSCOPE";
/// Conventional variable holding the NewsAPI key.
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";
/// Conventional variable holding the GNews key.
pub const GNEWS_API_KEY_ENV: &str = "GNEWS_API_KEY";
/// Conventional variable holding the OpenAI key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
