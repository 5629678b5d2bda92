use crate::checker::{ModelSettings, NO_MODEL};
use crate::error::{FactCheckError, FactCheckErrorExt};
use crate::prompt::ASSISTANT_SYSTEM;
use std::sync::Arc;
use tscope_derive::api_model;
use tscope_llm::{ChatModel, ChatRequest};

/// Assistant answer.
#[api_model]
pub struct ChatReply {
    pub response: String,
}

/// Single-turn fact-checking assistant.
#[derive(Debug, Clone)]
pub struct Assistant {
    model: Option<Arc<dyn ChatModel>>,
    model_name: String,
}

impl Assistant {
    #[must_use]
    pub fn new(model: Option<Arc<dyn ChatModel>>, settings: &ModelSettings) -> Self {
        Self { model, model_name: settings.model.clone() }
    }

    /// Answers `message` with the primary model.
    ///
    /// # Errors
    /// [`FactCheckError::Unavailable`] without a configured model,
    /// [`FactCheckError::Llm`] when the model call fails.
    pub async fn chat(&self, message: &str) -> Result<ChatReply, FactCheckError> {
        let model = self
            .model
            .as_ref()
            .ok_or(FactCheckError::Unavailable { message: NO_MODEL.into(), context: None })?;

        let request = ChatRequest::new(&self.model_name).system(ASSISTANT_SYSTEM).user(message);
        let response = model.complete(&request).await.context("chatbot")?;

        Ok(ChatReply { response })
    }
}
