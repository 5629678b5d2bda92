//! Facade crate for `TruthScope` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `tscope` with the `server` feature to get the HTTP routers.
//! - Call [`init`] to build every feature slice from one [`ApiConfig`].

use std::borrow::Cow;
pub use tscope_domain as domain;
use tscope_domain::config::ApiConfig;
use tscope_domain::registry::InitializedSlice;
pub use tscope_kernel as kernel;
pub use tscope_llm as llm;

/// Feature registry for runtime introspection.
pub mod features {
    pub use tscope_factcheck as factcheck;
    pub use tscope_media as media;
    pub use tscope_news as news;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "news",
        "factcheck",
        "media",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

#[cfg(feature = "server")]
pub mod server {
    pub use tscope_kernel::server::{ApiState, system_router};

    /// Routers of every feature slice.
    pub mod router {
        pub use tscope_factcheck::router as factcheck;
        pub use tscope_media::router as media;
        pub use tscope_news::router as news;
    }
}

#[tscope_derive::tscope_error]
pub enum BootstrapError {
    #[error("News slice failed{}: {source}", format_context(.context))]
    News { source: features::news::NewsError, context: Option<Cow<'static, str>> },
    #[error("Fact-check slice failed{}: {source}", format_context(.context))]
    FactCheck { source: features::factcheck::FactCheckError, context: Option<Cow<'static, str>> },
    #[error("Media slice failed{}: {source}", format_context(.context))]
    Media { source: features::media::MediaError, context: Option<Cow<'static, str>> },
}

/// Initialized slices plus handles the host needs after start-up.
#[derive(Debug)]
pub struct Platform {
    pub slices: Vec<InitializedSlice>,
    /// Owner of the trusted feed refresher.
    pub news: features::news::News,
}

/// Initializes every feature slice.
///
/// Fact-checking shares the news slice's trusted feed and providers, so news
/// is built first.
///
/// # Errors
/// Returns the first slice that fails to initialize.
pub fn init(config: &ApiConfig) -> Result<Platform, BootstrapError> {
    let news = features::news::build(&config.news)?;
    let factcheck = features::factcheck::build(config, &news)?;
    let media = features::media::build(&config.media)?;

    let slices = vec![
        InitializedSlice::new(news.clone()),
        InitializedSlice::new(factcheck),
        InitializedSlice::new(media),
    ];
    tracing::info!(count = slices.len(), "Feature slices initialized");

    Ok(Platform { slices, news })
}
