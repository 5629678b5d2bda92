use std::borrow::Cow;

/// A specialized [`NewsError`] enum of this crate.
#[tscope_derive::tscope_error]
pub enum NewsError {
    /// Transport failures, non-success feed responses and undecodable JSON.
    #[error("HTTP error{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },
    /// The payload is neither RSS nor Atom.
    #[error("Feed parse error{}: {source}", format_context(.context))]
    Feed { source: feed_rs::parser::ParseFeedError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal news error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
