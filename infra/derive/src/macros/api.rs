use super::error::derived_names;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Ident, ItemFn, ItemStruct};

/// Expands `#[api_model]` / `#[api_model(strict)]`.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let strict = match parse_strict(args) {
        Ok(strict) => strict,
        Err(err) => return err.to_compile_error(),
    };
    let serde = match SerdeFlags::read(&input.attrs) {
        Ok(flags) => flags,
        Err(err) => return err.to_compile_error(),
    };
    let derives = derived_names(&input.attrs);

    let mut missing = Vec::new();
    for (name, path) in [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ] {
        if !derives.contains(name) {
            missing.push(path);
        }
    }
    let derive_attr = if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename_attr =
        if serde.rename_all { quote! {} } else { quote! { #[serde(rename_all = "camelCase")] } };

    let deny_attr = if strict && !serde.deny_unknown_fields {
        quote! { #[serde(deny_unknown_fields)] }
    } else {
        quote! {}
    };

    quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    }
}

/// Expands `#[api_handler(...)]` into a `utoipa::path`-annotated handler.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_strict(args: TokenStream) -> syn::Result<bool> {
    if args.is_empty() {
        return Ok(false);
    }

    let ident: Ident = syn::parse2(args)?;
    if ident == "strict" {
        Ok(true)
    } else {
        Err(syn::Error::new_spanned(ident, "Unsupported argument; expected `strict`"))
    }
}

/// Serde container flags already present on the struct.
#[derive(Default)]
struct SerdeFlags {
    rename_all: bool,
    deny_unknown_fields: bool,
}

impl SerdeFlags {
    fn read(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut flags = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    flags.rename_all = true;
                    // Consume the literal so the parser can move on.
                    let _: syn::LitStr = meta.value()?.parse()?;
                } else if meta.path.is_ident("deny_unknown_fields") {
                    flags.deny_unknown_fields = true;
                } else if meta.input.peek(syn::Token![=]) {
                    let _: syn::Expr = meta.value()?.parse()?;
                } else if meta.input.peek(syn::token::Paren) {
                    let _content;
                    syn::parenthesized!(_content in meta.input);
                }
                Ok(())
            })?;
        }

        Ok(flags)
    }
}
