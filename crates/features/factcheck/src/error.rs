use std::borrow::Cow;

/// A specialized [`FactCheckError`] enum of this crate.
#[tscope_derive::tscope_error]
pub enum FactCheckError {
    /// The chat model failed or could not be constructed.
    #[error("Chat model error{}: {source}", format_context(.context))]
    Llm { source: tscope_llm::LlmError, context: Option<Cow<'static, str>> },
    /// No chat model is configured.
    #[error("{message}{}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal fact-check error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
