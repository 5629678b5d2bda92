//! # LLM client
//!
//! A small client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Callers depend on the [`ChatModel`] trait so features can be tested with
//! in-process fakes; [`OpenAiClient`] is the HTTP implementation.

mod client;
mod error;
mod message;

pub use crate::client::{OpenAiClient, OpenAiClientBuilder};
pub use crate::error::{LlmError, LlmErrorExt};
pub use crate::message::{ChatMessage, ChatRequest, Role};

use async_trait::async_trait;
use tracing::warn;

/// Anything able to answer a chat request with a single text reply.
#[async_trait]
pub trait ChatModel: std::fmt::Debug + Send + Sync {
    /// Returns the first choice's message content.
    ///
    /// # Errors
    /// Transport, API and empty-response failures.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

/// Runs `request`, retrying once with `fallback_model` when the first
/// attempt fails. The last error is returned when both attempts fail.
///
/// # Errors
/// The primary error when no fallback is given, otherwise the fallback's error.
pub async fn complete_with_fallback(
    model: &dyn ChatModel,
    request: &ChatRequest,
    fallback_model: Option<&str>,
) -> Result<String, LlmError> {
    match model.complete(request).await {
        Ok(reply) => Ok(reply),
        Err(err) => {
            let Some(fallback) = fallback_model.filter(|m| *m != request.model) else {
                return Err(err);
            };
            warn!(model = %request.model, fallback, error = %err, "Chat model failed, retrying");
            model.complete(&request.with_model(fallback)).await
        },
    }
}
