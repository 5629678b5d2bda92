use std::borrow::Cow;

/// Failures talking to a chat-completions endpoint.
#[tscope_derive::tscope_error]
pub enum LlmError {
    #[error("HTTP transport error{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The endpoint answered with a non-success status.
    #[error("API returned {status}{}: {body}", format_context(.context))]
    Api { status: u16, body: String, context: Option<Cow<'static, str>> },

    #[error("Model returned no choices{}", format_context(.context))]
    EmptyResponse { context: Option<Cow<'static, str>> },

    #[error("Invalid client configuration{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
