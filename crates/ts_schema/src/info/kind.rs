use core::fmt;

use crate::info::{EnumDescriptor, TypeHandle};

// -----------------------------------------------------------------------------
// ObjectKind

/// Whether a described type is written with a class tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectKind {
    /// A value type. Its concrete type is always known from context, so it
    /// is never tagged.
    #[default]
    Struct,
    /// A reference type. Tagged with its type path when type tags are on.
    Class,
}

// -----------------------------------------------------------------------------
// ValueKind

/// The shape of a member's value.
///
/// Every kind is `const`, so nested shapes such as `Vec<[u8; 4]>` are plain
/// `&'static` references built at compile time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    /// A signed integer within `min..=max`.
    Int { min: i64, max: i64 },
    /// An unsigned integer within `0..=max`.
    UInt { max: u64 },
    /// A 32-bit float.
    Float,
    /// A 64-bit float.
    Double,
    /// A string.
    String,
    /// A described enum, written by ordinal or by name.
    Enum(&'static EnumDescriptor),
    /// An ordered, growable sequence.
    Sequence(&'static ValueKind),
    /// A fixed array. `len` is `Some` when the length is part of the type.
    Array {
        element: &'static ValueKind,
        len: Option<usize>,
    },
    /// A nested object whose concrete type is known.
    Object(TypeHandle),
    /// A nested object whose concrete type is read from its class tag.
    Polymorphic,
}

impl ValueKind {
    /// The kind of a signed integer type with the given bounds.
    #[inline]
    pub const fn signed(min: i64, max: i64) -> Self {
        Self::Int { min, max }
    }

    /// The kind of an unsigned integer type with the given upper bound.
    #[inline]
    pub const fn unsigned(max: u64) -> Self {
        Self::UInt { max }
    }

    /// Returns `true` for kinds that hold other values.
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Array { .. })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { min, max } => write!(f, "int({min}..={max})"),
            Self::UInt { max } => write!(f, "uint(0..={max})"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::String => f.write_str("string"),
            Self::Enum(info) => write!(f, "enum `{}`", info.type_path()),
            Self::Sequence(element) => write!(f, "sequence of {element}"),
            Self::Array { element, len: None } => write!(f, "array of {element}"),
            Self::Array {
                element,
                len: Some(len),
            } => write!(f, "array of {len} {element}"),
            Self::Object(handle) => write!(f, "object `{}`", handle.type_path()),
            Self::Polymorphic => f.write_str("polymorphic object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ValueKind;
    use alloc::string::ToString;

    #[test]
    fn display() {
        static BYTE: ValueKind = ValueKind::unsigned(255);
        static QUAD: ValueKind = ValueKind::Array {
            element: &BYTE,
            len: Some(4),
        };
        let kind = ValueKind::Sequence(&QUAD);
        assert_eq!(kind.to_string(), "sequence of array of 4 uint(0..=255)");
        assert!(kind.is_container());
        assert!(!BYTE.is_container());
    }
}
