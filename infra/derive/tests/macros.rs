use std::borrow::Cow;
use std::io;

mod error {
    use std::borrow::Cow;

    #[tscope_derive::tscope_error]
    pub enum DemoError {
        #[error("IO error{}: {source}", format_context(.context))]
        Io { source: std::io::Error, context: Option<Cow<'static, str>> },

        #[error("Rejected{}: {message}", format_context(.context))]
        Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

        #[error("Internal error{}: {message}", format_context(.context))]
        Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    }
}

use error::{DemoError, DemoErrorExt};

fn read_missing() -> Result<(), DemoError> {
    Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "gone")).context("Reading feed list")
}

#[test]
fn source_errors_convert_with_context() {
    let err = read_missing().unwrap_err();
    assert!(matches!(err, DemoError::Io { .. }));
    assert_eq!(err.to_string(), "IO error (Reading feed list): gone");
}

#[test]
fn question_mark_converts_source_without_context() {
    fn inner() -> Result<(), DemoError> {
        Err(io::Error::other("boom"))?;
        Ok(())
    }

    assert_eq!(inner().unwrap_err().to_string(), "IO error: boom");
}

#[test]
fn context_is_attached_to_own_variants() {
    let res: Result<(), DemoError> =
        Err(DemoError::Rejected { message: "empty headline".into(), context: None });
    let err = res.context("Validating request").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (Validating request): empty headline");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: DemoError = "static failure".into();
    let from_owned: DemoError = String::from("owned failure").into();

    assert!(matches!(from_static, DemoError::Internal { .. }));
    assert_eq!(from_owned.to_string(), "Internal error: owned failure");
}

#[tscope_derive::api_model(deny_unknown_fields = false)]
struct LooseRequest {
    headline: Option<String>,
    page_size: Option<u32>,
}

#[tscope_derive::api_model]
struct StrictResponse {
    verdict: String,
}

#[test]
fn api_model_applies_serde_policy() {
    let loose: LooseRequest =
        serde_json::from_str(r#"{"headline":"x","pageSize":3,"extra":true}"#).unwrap();
    assert_eq!(loose.headline.as_deref(), Some("x"));
    assert_eq!(loose.page_size, Some(3));

    let strict = serde_json::from_str::<StrictResponse>(r#"{"verdict":"ok","extra":1}"#);
    assert!(strict.is_err(), "unknown fields must be rejected by default");

    let body = serde_json::to_string(&StrictResponse { verdict: Cow::Borrowed("ok").into_owned() })
        .unwrap();
    assert_eq!(body, r#"{"verdict":"ok"}"#);
}
