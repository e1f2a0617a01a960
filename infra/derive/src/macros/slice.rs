use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemStruct;

pub fn expand_slice(input: ItemStruct) -> TokenStream {
    let ItemStruct { attrs, vis, ident, generics, fields, .. } = input;
    if !generics.params.is_empty() {
        return syn::Error::new_spanned(generics, "roster_slice does not support generic slices")
            .to_compile_error();
    }

    let inner = format_ident!("{ident}Inner");
    // Unit and tuple structs still need a trailing semicolon.
    let terminator = match fields {
        syn::Fields::Named(_) => quote! {},
        _ => quote! { ; },
    };

    quote! {
        #(#attrs)*
        #[derive(Debug)]
        #vis struct #inner #fields #terminator

        #[derive(Debug, Clone)]
        #vis struct #ident {
            inner: std::sync::Arc<#inner>,
        }

        impl #ident {
            pub fn new(inner: #inner) -> Self {
                Self { inner: std::sync::Arc::new(inner) }
            }
        }

        impl std::ops::Deref for #ident {
            type Target = #inner;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::roster_kernel::domain::slices::FeatureSlice for #ident {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    }
}
