#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the TruthScope crates.
//!
//! * [`macro@tscope_error`] turns an enum into a context-aware `thiserror` error.
//! * [`macro@api_model`] and [`macro@api_handler`] keep DTOs and axum handlers
//!   consistent and wire them into `utoipa` when the `server` feature is on.
//! * [`macro@feature_slice`] builds the `Arc` handle a feature registers in the
//!   kernel's API state.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a request/response model.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when they are not derived already,
/// `utoipa::ToSchema` behind the consumer's `server` feature, and the serde policy
/// `rename_all = "camelCase"` plus `deny_unknown_fields`.
///
/// # Arguments
///
/// * `rename_all = "snake_case"` - overrides the rename policy.
/// * `deny_unknown_fields = false` - accepts unknown fields (request bodies
///   posted by browsers usually want this).
///
/// # Example
///
/// ```rust,ignore
/// #[tscope_derive::api_model(deny_unknown_fields = false)]
/// pub struct CheckRequest {
///     pub headline: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an axum handler with `utoipa::path` when the consumer's `server`
/// feature is enabled.
///
/// Arguments are passed through to `utoipa::path` untouched.
///
/// ```rust,ignore
/// #[tscope_derive::api_handler(
///     get,
///     path = "/trusted_news",
///     responses((status = OK, body = [Headline])),
///     tag = NEWS_TAG,
/// )]
/// pub async fn trusted_news_handler() -> Json<Vec<Headline>> { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum into a crate error type.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * `<Name>Ext` trait with `.context(...)` for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant carrying a source.
/// * `From<Source>` for every variant with a `source` (or `#[source]`/`#[from]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for use inside `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. Variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[tscope_derive::tscope_error]
/// pub enum NewsError {
///     #[error("HTTP error{}: {source}", format_context(.context))]
///     Http { source: reqwest::Error, context: Option<Cow<'static, str>> },
///     #[error("Internal news error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn tscope_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Builds a feature slice handle.
///
/// `struct News { .. }` becomes `NewsInner { .. }` plus a cloneable `News`
/// wrapping `Arc<NewsInner>`, with `Deref` to the inner state and a
/// `FeatureSlice` impl for kernel registration.
///
/// ```rust,ignore
/// #[tscope_derive::feature_slice]
/// pub struct News {
///     pub service: NewsService,
/// }
///
/// let slice = News::new(NewsInner { service });
/// ```
#[proc_macro_attribute]
pub fn feature_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
