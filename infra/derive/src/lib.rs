#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the workspace.
//!
//! * [`roster_error`]: error enums with context helpers and `From` conversions.
//! * [`api_model`] / [`api_handler`]: DTO and handler glue for axum + utoipa.
//! * [`roster_slice`]: `Arc`-backed feature slice handles.
//! * [`main`]: async entry point on a preconfigured Tokio runtime.
//!
//! The examples below are `ignore`d because a proc-macro crate cannot use its own macros.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns `async fn main` into a synchronous `main` running on a `roster_runtime` profile.
///
/// # Arguments
///
/// * `high_performance` - Server profile: larger stacks, longer keep-alive.
/// * `memory_efficient` - Half the workers, smaller stacks.
/// * `default` (or no argument) - Worker threads auto-detected.
///
/// # Examples
///
/// ```rust,ignore
/// #[roster_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares an API data model (request or response body).
///
/// # Injected Behaviors
///
/// * `Debug`, `Serialize` and `Deserialize` derives, unless already present.
/// * `utoipa::ToSchema` when the consuming crate enables its `server` feature.
/// * `#[serde(rename_all = "camelCase")]` unless the struct sets its own `rename_all`.
/// * `#[serde(deny_unknown_fields)]` only when called as `#[api_model(strict)]`.
///
/// # Example
///
/// ```rust,ignore
/// use roster_derive::api_model;
///
/// #[api_model(strict)]
/// pub struct Employee {
///     pub id: String,
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an axum handler with `utoipa::path` (under the `server` feature).
///
/// Accepts the usual `utoipa::path` arguments: method, `path = "..."`,
/// `params(...)`, `request_body = ...`, `responses(...)`, `tag = ...`.
///
/// # Example
///
/// ```rust,ignore
/// use roster_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> Json<HealthResponse> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Defines a domain error enum.
///
/// # Features
///
/// * Derives `Debug` and `thiserror::Error` unless already derived.
/// * Generates a `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant wrapping a source error.
/// * Implements `From<Source>` for each variant with a `source` field.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * Provides a private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. Variants with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use roster_derive::roster_error;
/// use std::borrow::Cow;
///
/// #[roster_error]
/// pub enum ClientError {
///     #[error("Transport error{}: {source}", format_context(.context))]
///     Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn fetch(client: &reqwest::Client) -> Result<(), ClientError> {
///     let _ = client.get("http://upstream").build().context("Building list request")?;
///     Err("not implemented".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn roster_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `roster_kernel::domain::slices::FeatureSlice`.
///
/// # Example
/// ```rust,ignore
/// #[roster_derive::roster_slice]
/// pub struct Employees {
///     pub engine: QueryEngine<RegistryClient>,
/// }
///
/// let slice = Employees::new(EmployeesInner { engine });
/// ```
#[proc_macro_attribute]
pub fn roster_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
