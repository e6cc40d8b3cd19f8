use std::collections::BTreeSet;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{DataStruct, DeriveInput, Fields};

use crate::attributes::{MemberAttributes, TypeAttributes};

/// A field that is a member.
struct MemberField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    wire_name: String,
}

fn collect_members(data: &DataStruct) -> syn::Result<Vec<MemberField<'_>>> {
    let named = match &data.fields {
        Fields::Named(named) => &named.named,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(unnamed) => {
            return Err(syn::Error::new_spanned(
                unnamed,
                "`Notation` needs named fields, members are written by name",
            ));
        }
    };

    let mut seen = BTreeSet::new();
    let mut members = Vec::with_capacity(named.len());
    for field in named {
        let attrs = MemberAttributes::parse_attrs(&field.attrs, true)?;
        if attrs.skip.is_some() {
            if let Some(rename) = &attrs.rename {
                return Err(syn::Error::new(
                    rename.span(),
                    "a skipped field has no wire name to rename",
                ));
            }
            continue;
        }

        // Named fields always carry an identifier.
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let (wire_name, span) = match &attrs.rename {
            Some(lit) => (lit.value(), lit.span()),
            None => (ident.unraw().to_string(), ident.span()),
        };
        if !seen.insert(wire_name.clone()) {
            return Err(syn::Error::new(
                span,
                format!("wire name `{wire_name}` is used by more than one member"),
            ));
        }
        members.push(MemberField {
            ident,
            ty: &field.ty,
            wire_name,
        });
    }
    Ok(members)
}

/// `Object`, `Described` and `MemberValue` for a struct.
pub(crate) fn impl_struct(ast: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "`Notation` cannot be derived for generic types",
        ));
    }

    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    let members = collect_members(data)?;

    let ts = crate::path::ts_schema();
    let macro_exports_ = crate::path::macro_exports_(&ts);
    let ident = &ast.ident;

    let type_path = match &attrs.type_path {
        Some(lit) => quote! { #lit },
        None => crate::path::default_type_path(ident),
    };
    let rust_path = crate::path::default_type_path(ident);
    let object_kind = match attrs.class {
        Some(_) => quote! { #ts::ObjectKind::Class },
        None => quote! { #ts::ObjectKind::Struct },
    };

    let mut accessors = Vec::with_capacity(members.len());
    let mut descriptors = Vec::with_capacity(members.len());
    let mut field_types = Vec::with_capacity(members.len());

    for (index, member) in members.iter().enumerate() {
        let MemberField {
            ident: field,
            ty,
            wire_name,
        } = member;
        let field_name = field.unraw().to_string();
        let get = format_ident!("__get_{}", index, span = Span::call_site());
        let set = format_ident!("__set_{}", index, span = Span::call_site());

        accessors.push(quote! {
            fn #get<'a>(
                object: &'a (dyn #ts::Object + 'static),
            ) -> ::core::option::Option<#ts::ValueRef<'a>> {
                let this = object.downcast_ref::<#ident>()?;
                <#ty as #ts::Member>::get(&this.#field)
            }

            fn #set(
                object: &mut (dyn #ts::Object + 'static),
                value: #ts::Value,
            ) -> ::core::result::Result<(), #ts::NotationError> {
                let this = #macro_exports_::downcast_target::<#ident>(object)?;
                <#ty as #ts::Member>::set(&mut this.#field, value)
            }
        });

        descriptors.push(quote! {
            #ts::info::MemberDescriptor::of::<#ty>(#wire_name, #field_name, #get, #set)
        });

        field_types.push(*ty);
    }

    let auto_register = crate::auto_register::impl_auto_register(&attrs, &ts, ident);

    Ok(quote! {
        const _: () = {
            impl #ts::Object for #ident {
                #[inline]
                fn type_handle(&self) -> #ts::TypeHandle {
                    #ts::TypeHandle::of::<Self>()
                }
            }

            impl #ts::Described for #ident {
                #[inline]
                fn type_path() -> &'static str {
                    #type_path
                }

                #[inline]
                fn rust_path() -> &'static str {
                    #rust_path
                }

                #[inline]
                fn object_kind() -> #ts::ObjectKind {
                    #object_kind
                }

                fn members() -> ::std::vec::Vec<#ts::info::MemberDescriptor> {
                    #(#accessors)*

                    ::std::vec![#(#descriptors),*]
                }

                #[allow(unused_variables)]
                fn register_members(scope: &mut #ts::TypeScope) {
                    #(<#field_types as #ts::Member>::register_dependencies(scope);)*
                }
            }

            impl #ts::MemberValue for #ident {
                const KIND: #ts::ValueKind = #ts::ValueKind::Object(#ts::TypeHandle::of::<Self>());

                #[inline]
                fn to_value(&self) -> #ts::ValueRef<'_> {
                    #ts::ValueRef::Object(self)
                }

                #[inline]
                fn from_value(value: #ts::Value) -> ::core::result::Result<Self, #ts::NotationError> {
                    #macro_exports_::object_from_value::<Self>(value)
                }

                fn register_dependencies(scope: &mut #ts::TypeScope) {
                    scope.register::<Self>();
                }
            }
        };

        #auto_register
    })
}
