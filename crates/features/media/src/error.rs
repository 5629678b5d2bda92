use std::borrow::Cow;

/// A specialized [`MediaError`] enum of this crate.
#[tscope_derive::tscope_error]
pub enum MediaError {
    /// Empty name, disallowed extension, or a name with nothing safe left.
    #[error("Invalid file type{}", format_context(.context))]
    InvalidFileType { context: Option<Cow<'static, str>> },
    #[error("Media I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
    /// The inspector rejected the file contents.
    #[error("{message}{}", format_context(.context))]
    Inspection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal media error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
