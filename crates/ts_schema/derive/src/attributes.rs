//! Parsing of `#[notation(...)]`.

use proc_macro2::Span;
use syn::{Attribute, LitStr};

use crate::NOTATION_ATTRIBUTE_NAME;

/// Attributes on the struct or enum itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[notation(class)]`.
    pub class: Option<Span>,
    /// `#[notation(type_path = "...")]`.
    pub type_path: Option<LitStr>,
    /// `#[notation(auto_register)]`.
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in notation_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("class") {
                    result.class = Some(span_of(&meta.path));
                } else if meta.path.is_ident("auto_register") {
                    result.auto_register = Some(span_of(&meta.path));
                } else if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`type_path` cannot be empty"));
                    }
                    result.type_path = Some(lit);
                } else {
                    return Err(meta.error(
                        "expected one of `class`, `type_path = \"...\"` or `auto_register`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(result)
    }
}

/// Attributes on a field or an enum variant.
#[derive(Default)]
pub(crate) struct MemberAttributes {
    /// `#[notation(rename = "...")]`.
    pub rename: Option<LitStr>,
    /// `#[notation(skip)]`, fields only.
    pub skip: Option<Span>,
}

impl MemberAttributes {
    pub fn parse_attrs(attrs: &[Attribute], allow_skip: bool) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in notation_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`rename` cannot be empty"));
                    }
                    result.rename = Some(lit);
                } else if allow_skip && meta.path.is_ident("skip") {
                    result.skip = Some(span_of(&meta.path));
                } else if allow_skip {
                    return Err(meta.error("expected `rename = \"...\"` or `skip`"));
                } else {
                    return Err(meta.error("expected `rename = \"...\"`"));
                }
                Ok(())
            })?;
        }
        Ok(result)
    }
}

fn notation_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(NOTATION_ATTRIBUTE_NAME))
}

fn span_of(path: &syn::Path) -> Span {
    syn::spanned::Spanned::span(path)
}
