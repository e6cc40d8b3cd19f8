//! Paths into `ts_schema` as seen from the invoking crate.

use proc_macro2::TokenStream;
use quote::quote;

/// The path of `ts_schema` from the invoking crate.
///
/// 1. Crates depending on `ts_schema` get `::ts_schema`.
/// 2. Crates depending on the `tessel` facade get `::tessel::schema`.
/// 3. Anything else gets `::ts_schema`, which `ts_schema` itself supports
///    through `extern crate self`.
///
/// Reads the invoking crate's manifest, so call it once per expansion.
pub(crate) fn ts_schema() -> syn::Path {
    ts_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("ts_schema"))
}

#[inline(always)]
pub(crate) fn macro_exports_(ts_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #ts_schema_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(ts_schema_path: &syn::Path) -> TokenStream {
    quote! {
        #ts_schema_path::__macro_exports::auto_register
    }
}

/// `concat!(module_path!(), "::", ident)`.
pub(crate) fn default_type_path(ident: &syn::Ident) -> TokenStream {
    let name = ident.to_string();
    quote! {
        ::core::concat!(::core::module_path!(), "::", #name)
    }
}
