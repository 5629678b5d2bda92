use crate::message::{ChatRequest, ChatResponse};
use crate::{ChatModel, LlmError, LlmErrorExt};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for OpenAI-compatible chat completions.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn builder(api_key: impl Into<String>) -> OpenAiClientBuilder {
        OpenAiClientBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[must_use = "call .build() to create the client"]
#[derive(Debug)]
pub struct OpenAiClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiClientBuilder {
    /// Points the client at a compatible API (proxy, local gateway, test server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// # Errors
    /// [`LlmError::Config`] for a blank API key, [`LlmError::Http`] when the
    /// TLS backend cannot be initialized.
    pub fn build(self) -> Result<OpenAiClient, LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::Config { message: "API key is empty".into(), context: None });
        }

        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Building chat completions HTTP client")?;

        Ok(OpenAiClient { http, base_url: self.base_url, api_key: self.api_key })
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        debug!(model = %request.model, messages = request.messages.len(), "Requesting chat completion");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .context("Sending chat completion request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status: status.as_u16(), body, context: None });
        }

        let body: ChatResponse =
            response.json().await.context("Decoding chat completion response")?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse { context: Some(request.model.clone().into()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_rejected() {
        let err = OpenAiClient::builder("  ").build().unwrap_err();
        assert!(matches!(err, LlmError::Config { .. }));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = OpenAiClient::builder("sk-test").base_url("http://localhost:9/v1/").build().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9/v1/chat/completions");
    }
}
