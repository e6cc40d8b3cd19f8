use std::collections::BTreeSet;

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::{DataEnum, DeriveInput, Expr, ExprLit, ExprUnary, Fields, Lit, UnOp};

use crate::attributes::{MemberAttributes, TypeAttributes};

struct Variant<'a> {
    ident: &'a syn::Ident,
    name: String,
    ordinal: i64,
}

/// Reads an explicit discriminant. Only integer literals, possibly negated.
fn discriminant(expr: &Expr) -> syn::Result<i64> {
    let (negative, lit) = match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(lit), ..
        }) => (false, lit),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match &**expr {
            Expr::Lit(ExprLit {
                lit: Lit::Int(lit), ..
            }) => (true, lit),
            _ => return Err(syn::Error::new_spanned(expr, "expected an integer literal")),
        },
        _ => {
            return Err(syn::Error::new_spanned(
                expr,
                "`Notation` needs integer literal discriminants",
            ));
        }
    };

    let magnitude: i128 = lit.base10_parse()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| syn::Error::new_spanned(expr, "ordinal does not fit in i64"))
}

fn collect_variants(data: &DataEnum) -> syn::Result<Vec<Variant<'_>>> {
    let mut names = BTreeSet::new();
    let mut variants = Vec::with_capacity(data.variants.len());
    let mut next: Option<i64> = Some(0);

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                &variant.fields,
                "`Notation` enums cannot have fields",
            ));
        }

        let ordinal = match &variant.discriminant {
            Some((_, expr)) => discriminant(expr)?,
            None => next.ok_or_else(|| {
                syn::Error::new_spanned(&variant.ident, "implicit ordinal overflows i64")
            })?,
        };
        next = ordinal.checked_add(1);

        let attrs = MemberAttributes::parse_attrs(&variant.attrs, false)?;
        let (name, span) = match &attrs.rename {
            Some(lit) => (lit.value(), lit.span()),
            None => (variant.ident.unraw().to_string(), variant.ident.span()),
        };
        if !names.insert(name.clone()) {
            return Err(syn::Error::new(
                span,
                format!("variant name `{name}` is used more than once"),
            ));
        }

        variants.push(Variant {
            ident: &variant.ident,
            name,
            ordinal,
        });
    }
    Ok(variants)
}

/// `EnumMember` and `MemberValue` for a field-less enum.
pub(crate) fn impl_enum(ast: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "`Notation` cannot be derived for generic types",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`Notation` cannot be derived for enums without variants",
        ));
    }

    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    if let Some(span) = attrs.class {
        return Err(syn::Error::new(span, "enums cannot be classes"));
    }
    if let Some(span) = attrs.auto_register {
        return Err(syn::Error::new(
            span,
            "enums are not objects and cannot be registered",
        ));
    }

    let variants = collect_variants(data)?;

    let ts = crate::path::ts_schema();
    let macro_exports_ = crate::path::macro_exports_(&ts);
    let ident = &ast.ident;

    let type_path = match &attrs.type_path {
        Some(lit) => quote! { #lit },
        None => crate::path::default_type_path(ident),
    };

    let entries = variants.iter().map(|v| {
        let name = &v.name;
        let ordinal = Literal::i64_unsuffixed(v.ordinal);
        quote! { (#name, #ordinal) }
    });
    let from_arms = variants.iter().map(|v| {
        let variant = v.ident;
        let ordinal = Literal::i64_unsuffixed(v.ordinal);
        quote! { #ordinal => ::core::option::Option::Some(Self::#variant), }
    });
    let to_arms = variants.iter().map(|v| {
        let variant = v.ident;
        let ordinal = Literal::i64_unsuffixed(v.ordinal);
        quote! { Self::#variant => #ordinal, }
    });

    Ok(quote! {
        const _: () = {
            impl #ts::EnumMember for #ident {
                const DESCRIPTOR: &'static #ts::info::EnumDescriptor =
                    &#ts::info::EnumDescriptor::new(#type_path, &[#(#entries),*]);

                fn from_ordinal(ordinal: i64) -> ::core::option::Option<Self> {
                    match ordinal {
                        #(#from_arms)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn ordinal(&self) -> i64 {
                    match self {
                        #(#to_arms)*
                    }
                }
            }

            impl #ts::MemberValue for #ident {
                const KIND: #ts::ValueKind =
                    #ts::ValueKind::Enum(<Self as #ts::EnumMember>::DESCRIPTOR);

                #[inline]
                fn to_value(&self) -> #ts::ValueRef<'_> {
                    #ts::ValueRef::Enum(<Self as #ts::EnumMember>::ordinal(self))
                }

                #[inline]
                fn from_value(value: #ts::Value) -> ::core::result::Result<Self, #ts::NotationError> {
                    #macro_exports_::enum_from_value::<Self>(value)
                }
            }
        };
    })
}
