use proc_macro2::TokenStream;

use crate::attributes::TypeAttributes;

/// `inventory` submission for `#[notation(auto_register)]`.
#[cfg(feature = "auto_register")]
pub(crate) fn impl_auto_register(
    attrs: &TypeAttributes,
    ts_schema_path: &syn::Path,
    ident: &syn::Ident,
) -> TokenStream {
    use quote::quote_spanned;

    match attrs.auto_register {
        Some(span) => {
            let auto_register_ = crate::path::auto_register_(ts_schema_path);
            quote_spanned! { span =>
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        #auto_register_::__register::<#ident>
                    )
                }
            }
        }
        None => TokenStream::new(),
    }
}

/// `#[notation(auto_register)]` is a no-op without the feature.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn impl_auto_register(
    _: &TypeAttributes,
    _: &syn::Path,
    _: &syn::Ident,
) -> TokenStream {
    TokenStream::new()
}
