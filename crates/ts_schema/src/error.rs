use alloc::string::String;
use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ErrorKind

/// The failure class of a [`NotationError`], for callers that only branch on
/// the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text violates the grammar.
    Format,
    /// The text is well-formed but disagrees with the type's descriptors.
    Schema,
    /// A type tag names a type the scope does not know.
    UnknownType,
    /// A descriptor or generator request cannot be served.
    UnsupportedType,
    /// The reader was driven incorrectly.
    DecoderState,
    /// Writing to an external sink failed.
    Io,
}

// -----------------------------------------------------------------------------
// Reasons

/// What exactly broke the grammar.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum FormatReason {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("expected one of `{expected}`, found {found:?}")]
    UnexpectedChar { expected: &'static str, found: char },

    #[error("unknown escape sequence `\\{0}`")]
    InvalidEscape(char),

    #[error("number has no digits")]
    MissingDigits,

    #[error("integer does not fit the target type")]
    IntegerOverflow,

    #[error("malformed floating-point number `{0}`")]
    InvalidFloat(String),

    #[error("floating-point value {0} has no textual form")]
    NonFiniteFloat(f64),

    #[error("unexpected {0:?} after the root object")]
    TrailingInput(char),

    #[error("objects nested deeper than {0} levels")]
    TooDeep(usize),
}

/// How well-formed text disagrees with the descriptors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaReason {
    #[error("required member `{member}` of `{type_path}` is missing")]
    MissingMember {
        type_path: &'static str,
        member: &'static str,
    },

    #[error("`{type_path}` has no member named `{name}` at this position")]
    UnexpectedMember {
        type_path: &'static str,
        name: String,
    },

    #[error("expected class tag `{tag}` as the first member, found {found:?}")]
    MissingClassTag { tag: String, found: Option<String> },

    #[error("expected an object of type `{expected}`, found tag `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("polymorphic members need type tags to be enabled")]
    TypeTagsRequired,

    #[error("`{enum_path}` has no variant {variant}")]
    UnknownVariant {
        enum_path: &'static str,
        variant: String,
    },

    #[error("expected an array of {expected} elements, found {found}")]
    ArrayLength { expected: usize, found: usize },

    #[error("member `{member}` of `{type_path}` has the same name as the class tag")]
    TagCollision {
        type_path: &'static str,
        member: &'static str,
    },

    #[error("decoder for `{type_path}` was generated with a different `{option}`")]
    OptionsMismatch {
        type_path: &'static str,
        option: &'static str,
    },
}

// -----------------------------------------------------------------------------
// NotationError

/// The error type of every encode, decode and descriptor operation.
///
/// Errors raised while reading carry the character offset at which the
/// problem was detected.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum NotationError {
    #[error("format error{}: {reason}", at(.offset))]
    Format {
        reason: FormatReason,
        offset: Option<usize>,
    },

    #[error("schema error{}: {reason}", at(.offset))]
    Schema {
        reason: SchemaReason,
        offset: Option<usize>,
    },

    #[error("unknown type `{name}`{}", at(.offset))]
    UnknownType { name: String, offset: Option<usize> },

    #[error("unsupported type: {detail}")]
    UnsupportedType { detail: String },

    #[error("decoder state error{}: {detail}", at(.offset))]
    DecoderState {
        detail: &'static str,
        offset: Option<usize>,
    },

    #[error("i/o error: {detail}")]
    Io { detail: String },
}

struct At(Option<usize>);

impl fmt::Display for At {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(offset) => write!(f, " at offset {offset}"),
            None => Ok(()),
        }
    }
}

#[inline]
fn at(offset: &Option<usize>) -> At {
    At(*offset)
}

impl NotationError {
    #[inline]
    pub const fn format(reason: FormatReason, offset: usize) -> Self {
        Self::Format {
            reason,
            offset: Some(offset),
        }
    }

    #[inline]
    pub const fn schema(reason: SchemaReason) -> Self {
        Self::Schema {
            reason,
            offset: None,
        }
    }

    #[inline]
    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::UnsupportedType {
            detail: detail.into(),
        }
    }

    /// Returns the failure class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } => ErrorKind::Format,
            Self::Schema { .. } => ErrorKind::Schema,
            Self::UnknownType { .. } => ErrorKind::UnknownType,
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::DecoderState { .. } => ErrorKind::DecoderState,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns the character offset the error was raised at, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Format { offset, .. }
            | Self::Schema { offset, .. }
            | Self::UnknownType { offset, .. }
            | Self::DecoderState { offset, .. } => *offset,
            Self::UnsupportedType { .. } | Self::Io { .. } => None,
        }
    }

    /// Fills in `offset` unless the error already carries one.
    #[must_use]
    pub fn or_at(mut self, position: usize) -> Self {
        match &mut self {
            Self::Format { offset, .. }
            | Self::Schema { offset, .. }
            | Self::UnknownType { offset, .. }
            | Self::DecoderState { offset, .. } => {
                offset.get_or_insert(position);
            }
            Self::UnsupportedType { .. } | Self::Io { .. } => {}
        }
        self
    }
}

impl From<std::io::Error> for NotationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            detail: alloc::format!("{err}"),
        }
    }
}

impl From<fmt::Error> for NotationError {
    fn from(_: fmt::Error) -> Self {
        Self::Io {
            detail: String::from("formatter refused the output"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, FormatReason, NotationError, SchemaReason};
    use alloc::string::ToString;

    #[test]
    fn display_includes_offset() {
        let err = NotationError::format(FormatReason::MissingDigits, 7);
        assert_eq!(err.to_string(), "format error at offset 7: number has no digits");
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.offset(), Some(7));
    }

    #[test]
    fn or_at_keeps_first_offset() {
        let err = NotationError::schema(SchemaReason::TypeTagsRequired).or_at(3);
        assert_eq!(err.offset(), Some(3));
        assert_eq!(err.or_at(9).offset(), Some(3));

        let err = NotationError::unsupported("x").or_at(1);
        assert_eq!(err.offset(), None);
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }
}
