//! See [`Notation`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static NOTATION_ATTRIBUTE_NAME: &str = "notation";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod auto_register;
mod enum_impl;
mod path;
mod struct_impl;

// -----------------------------------------------------------------------------
// Macros

/// # Describe a Type
///
/// `#[derive(Notation)]` lets the encoder and the decoders walk a type member
/// by member.
///
/// ## Structs
///
/// Structs with named fields (or unit structs, which have no members)
/// implement `Object`, `Described` and `MemberValue`. Members are the fields
/// in declaration order. Every field type must implement `Member`: a
/// supported value, or an `Option` of one for an optional member. The struct
/// must implement `Default`.
///
/// ```rust, ignore
/// #[derive(Notation, Default)]
/// #[notation(class, auto_register)]
/// struct Sprite {
///     id: u32,
///     #[notation(rename = "tex")]
///     texture: String,
///     frame: Option<u16>,
///     #[notation(skip)]
///     cached: Vec<u8>,
/// }
/// ```
///
/// Type-level attributes:
///
/// - `class`: the type is a reference type. With type tags on, it is written
///   with a class tag and may fill a polymorphic (`Box<dyn Object>`) member.
///   Without it the type is a value type and is never tagged.
/// - `type_path = "..."`: the name written into class tags. Defaults to the
///   module path plus the type name.
/// - `auto_register`: `TypeScope::auto_register` will pick the type up. A
///   no-op without the `auto_register` feature.
///
/// Field-level attributes:
///
/// - `rename = "..."`: the wire name. Defaults to the field name.
/// - `skip`: not a member. The decoders leave the field at its default.
///
/// Wire names must be unique within a type.
///
/// ## Enums
///
/// Field-less enums implement `EnumMember` and `MemberValue`. Ordinals are
/// the discriminants: explicit integer literals are used as written, implicit
/// ones count up from the previous variant. Variants accept
/// `#[notation(rename = "...")]` to change the name used when enums are
/// written as strings.
///
/// ```rust, ignore
/// #[derive(Notation, Default, Clone, Copy)]
/// enum Blend {
///     #[default]
///     Normal,
///     Add = 4,
///     #[notation(rename = "mul")]
///     Multiply,   // ordinal 5
/// }
/// ```
///
/// Generic types cannot be described.
#[proc_macro_derive(Notation, attributes(notation))]
pub fn derive_notation(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let result = match &ast.data {
        syn::Data::Struct(data) => struct_impl::impl_struct(&ast, data),
        syn::Data::Enum(data) => enum_impl::impl_enum(&ast, data),
        syn::Data::Union(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "`Notation` cannot be derived for unions",
        )),
    };

    result.unwrap_or_else(syn::Error::into_compile_error).into()
}
