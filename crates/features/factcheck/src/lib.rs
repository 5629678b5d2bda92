//! Fact-check feature slice: headline verification and the assistant chat.

mod assistant;
mod checker;
mod error;
#[cfg(feature = "server")]
mod handlers;
mod matcher;
mod prompt;
mod verdict;

pub use crate::assistant::{Assistant, ChatReply};
pub use crate::checker::{EvidenceSettings, FactChecker, ModelSettings};
pub use crate::error::{FactCheckError, FactCheckErrorExt};
#[cfg(feature = "server")]
pub use crate::handlers::router;
pub use crate::matcher::{normalize, token_set_ratio};
pub use crate::verdict::{FactCheckReport, NO_DIRECT_EVIDENCE, VerdictLabel};

use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tscope_domain::config::{ApiConfig, LlmConfig, non_blank};
use tscope_kernel::domain::registry::InitializedSlice;
use tscope_llm::{ChatModel, OpenAiClient};
use tscope_news::News;

/// Fact-check feature state
#[tscope_derive::feature_slice]
pub struct FactCheck {
    pub checker: FactChecker,
    pub assistant: Assistant,
}

/// The OpenAI-compatible client, when an API key is configured.
///
/// # Errors
/// [`FactCheckError::Llm`] when the client cannot be built.
pub fn chat_model(cfg: &LlmConfig) -> Result<Option<Arc<dyn ChatModel>>, FactCheckError> {
    let Some(key) = non_blank(cfg.api_key.as_ref()) else {
        return Ok(None);
    };
    let client = OpenAiClient::builder(key)
        .base_url(&cfg.base_url)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()
        .context("Building chat client")?;
    Ok(Some(Arc::new(client) as Arc<dyn ChatModel>))
}

impl FactCheck {
    /// Wires the slice to the news slice's trusted feed and providers.
    #[must_use]
    pub fn with_model(cfg: &ApiConfig, news: &News, model: Option<Arc<dyn ChatModel>>) -> Self {
        let settings = ModelSettings {
            model: cfg.llm.model.clone(),
            fallback_model: cfg.llm.fallback_model.clone(),
            max_tokens: cfg.llm.max_tokens,
        };
        let evidence = EvidenceSettings {
            match_threshold: cfg.factcheck.match_threshold,
            limit: cfg.news.evidence_page_size,
            timeout: cfg.news.evidence_timeout(),
        };

        let assistant = Assistant::new(model.clone(), &settings);
        let checker = FactChecker::new(
            news.feed.clone(),
            news.service.providers().cloned().collect(),
            model,
            settings,
            evidence,
        );

        Self::new(FactCheckInner { checker, assistant })
    }
}

/// Builds the fact-check slice.
///
/// # Errors
/// See [`chat_model`].
pub fn build(cfg: &ApiConfig, news: &News) -> Result<FactCheck, FactCheckError> {
    let model = chat_model(&cfg.llm)?;
    info!(model_configured = model.is_some(), model = %cfg.llm.model, "Fact-check slice initialized");
    Ok(FactCheck::with_model(cfg, news, model))
}

/// Initializes the fact-check feature.
///
/// # Errors
/// See [`build`].
pub fn init(cfg: &ApiConfig, news: &News) -> Result<InitializedSlice, FactCheckError> {
    build(cfg, news).map(InitializedSlice::new)
}
