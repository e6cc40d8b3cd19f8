//! Runtime support for generated decoders.
//!
//! `ts_codegen` emits one [`CompiledDecoder`] per type. The generated code
//! reads members in declaration order through the [`Session`] grammar steps
//! and converts values with the helpers below, so there is no dispatch on
//! [`ValueKind`](ts_schema::ValueKind) at run time.
//!
//! A generated decoder looks like this:
//!
//! ```
//! use ts_schema::{derive::Notation, FormatOptions, NotationError, SchemaRegistry};
//! use ts_text::compiled::{self, CompiledDecoder};
//! use ts_text::{Decoder, Session};
//!
//! #[derive(Notation, Default, Debug, PartialEq)]
//! struct Pair {
//!     left: u8,
//!     right: Option<String>,
//! }
//!
//! struct PairDecoder;
//!
//! impl CompiledDecoder for PairDecoder {
//!     type Output = Pair;
//!
//!     const TYPE_PATH: &'static str = "rust_out::Pair";
//!     const IS_CLASS: bool = false;
//!     const EMIT_TYPE_TAGS: bool = false;
//!     const CLASS_TAG: &'static str = "class";
//!     const ENUM_AS_STRING: bool = false;
//!     const ARRAY_LENGTH_PREFIX: bool = false;
//!     const MEMBERS: &'static [&'static str] = &["left", "right"];
//!
//!     fn read_fields(cx: &mut Session<'_>, mut name: Option<String>) -> Result<Pair, NotationError> {
//!         let mut result = Pair::default();
//!         cx.expect_member(&name, "left", Self::TYPE_PATH, Self::MEMBERS)?;
//!         let at = cx.position();
//!         result.left = compiled::uint(cx.require_uint()?, at)?;
//!         name = cx.next_member_name(false)?;
//!         if name.as_deref() == Some("right") {
//!             result.right = Some(cx.require_string()?);
//!             name = cx.next_member_name(false)?;
//!         }
//!         cx.finish_object(name, Self::TYPE_PATH)?;
//!         Ok(result)
//!     }
//! }
//!
//! let registry = SchemaRegistry::new();
//! let options = FormatOptions::default();
//! let pair = Decoder::new(&registry, &options)
//!     .decode_compiled::<PairDecoder>(r#"{"left":7}"#)
//!     .unwrap();
//! assert_eq!(pair, Pair { left: 7, right: None });
//! ```

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use ts_schema::{Described, EnumMember, FormatReason, SchemaReason};

pub use crate::decoder::{Session, capacity};
pub use ts_schema::NotationError;

// -----------------------------------------------------------------------------
// CompiledDecoder

/// A decoder specialized to one type and one set of options.
pub trait CompiledDecoder {
    type Output: Described;

    /// The type path the class tag must carry.
    const TYPE_PATH: &'static str;
    /// Whether the type is written with a class tag.
    const IS_CLASS: bool;

    const EMIT_TYPE_TAGS: bool;
    const CLASS_TAG: &'static str;
    const ENUM_AS_STRING: bool;
    const ARRAY_LENGTH_PREFIX: bool;

    /// Wire names of every member, in order.
    const MEMBERS: &'static [&'static str];

    /// Reads the members after the class tag, if any, and the closing `}`.
    /// `name` is the first member name.
    fn read_fields(cx: &mut Session<'_>, name: Option<String>) -> Result<Self::Output, NotationError>;

    /// Reads a whole object.
    fn read_object(cx: &mut Session<'_>) -> Result<Self::Output, NotationError> {
        let mut name = cx.begin_object()?;
        if Self::IS_CLASS && Self::EMIT_TYPE_TAGS {
            name = cx.expect_class_tag(name, Self::TYPE_PATH)?;
        }
        Self::read_fields(cx, name)
    }
}

// -----------------------------------------------------------------------------
// Conversions

/// Narrows a signed integer read at `at`.
#[inline]
pub fn int<T: TryFrom<i64>>(value: i64, at: usize) -> Result<T, NotationError> {
    T::try_from(value).map_err(|_| NotationError::format(FormatReason::IntegerOverflow, at))
}

/// Narrows an unsigned integer read at `at`.
#[inline]
pub fn uint<T: TryFrom<u64>>(value: u64, at: usize) -> Result<T, NotationError> {
    T::try_from(value).map_err(|_| NotationError::format(FormatReason::IntegerOverflow, at))
}

fn variant<E: EnumMember>(ordinal: i64) -> Result<E, NotationError> {
    E::from_ordinal(ordinal).ok_or_else(|| {
        NotationError::unsupported(format!(
            "`{}` lists ordinal {ordinal} but has no such variant",
            E::DESCRIPTOR.type_path()
        ))
    })
}

/// An enum written by variant name.
pub fn enum_by_name<E: EnumMember>(name: String, at: usize) -> Result<E, NotationError> {
    let ordinal = E::DESCRIPTOR.resolve_name(name).map_err(|err| err.or_at(at))?;
    variant(ordinal)
}

/// An enum written by ordinal.
pub fn enum_by_ordinal<E: EnumMember>(ordinal: i64, at: usize) -> Result<E, NotationError> {
    let ordinal = E::DESCRIPTOR.resolve_ordinal(ordinal).map_err(|err| err.or_at(at))?;
    variant(ordinal)
}

/// A container built from the elements of a list.
pub trait FromElements: Sized {
    type Element;

    fn from_elements(items: Vec<Self::Element>) -> Result<Self, NotationError>;
}

impl<T> FromElements for Vec<T> {
    type Element = T;

    #[inline]
    fn from_elements(items: Vec<T>) -> Result<Self, NotationError> {
        Ok(items)
    }
}

impl<T> FromElements for Box<[T]> {
    type Element = T;

    #[inline]
    fn from_elements(items: Vec<T>) -> Result<Self, NotationError> {
        Ok(items.into_boxed_slice())
    }
}

impl<T, const N: usize> FromElements for [T; N] {
    type Element = T;

    fn from_elements(items: Vec<T>) -> Result<Self, NotationError> {
        <[T; N]>::try_from(items).map_err(|items| {
            NotationError::schema(SchemaReason::ArrayLength {
                expected: N,
                found: items.len(),
            })
        })
    }
}

/// Builds an array member from the elements read for the value at `at`.
#[inline]
pub fn collect_array<A: FromElements>(items: Vec<A::Element>, at: usize) -> Result<A, NotationError> {
    A::from_elements(items).map_err(|err| err.or_at(at))
}

/// Stores a nested object in a member that holds it inline or boxed.
#[inline]
pub fn nest<T, M: From<T>>(value: T) -> M {
    M::from(value)
}
