use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, ItemFn, ReturnType, Type};

/// Expands `#[roster_runtime::main]`.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(&input.sig.fn_token, "#[roster_runtime::main] requires an async fn")
            .to_compile_error();
    }
    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "#[roster_runtime::main] requires a Result return type",
        )
        .to_compile_error();
    }

    let profile = match profile_constructor(args) {
        Ok(tokens) => tokens,
        Err(err) => return err.to_compile_error(),
    };

    let ItemFn { attrs, vis, sig, block } = input;
    let name = &sig.ident;
    let output = &sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = #profile;
            let runtime = ::roster_runtime::build_runtime_with_config(&config)?;
            runtime.block_on(async #block)
        }
    }
}

fn profile_constructor(args: TokenStream) -> syn::Result<TokenStream> {
    if args.is_empty() {
        return Ok(quote! { ::roster_runtime::RuntimeConfig::default() });
    }

    let ident: syn::Ident = syn::parse2(args)?;
    match ident.to_string().as_str() {
        "high_performance" => Ok(quote! { ::roster_runtime::RuntimeConfig::high_performance() }),
        "memory_efficient" => Ok(quote! { ::roster_runtime::RuntimeConfig::memory_efficient() }),
        "default" => Ok(quote! { ::roster_runtime::RuntimeConfig::default() }),
        _ => Err(Error::new_spanned(
            ident,
            "Unknown runtime profile. Use: high_performance, memory_efficient, or default",
        )),
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    matches!(&**ty, Type::Path(p) if p.path.segments.last().is_some_and(|s| s.ident == "Result"))
}
