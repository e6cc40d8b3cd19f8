//! Settings shared by the encoder, the interpreted decoder and the generator.
//!
//! [`StructuralOptions`] decide what is written (type tags, which types a tag
//! may name), [`TextOptions`] decide how it looks. [`FormatOptions`] bundles
//! both.

use alloc::string::String;
use alloc::sync::Arc;

use crate::registry::TypeScope;

// -----------------------------------------------------------------------------
// StructuralOptions

/// What is written, independent of layout.
#[derive(Debug, Clone, Default)]
pub struct StructuralOptions {
    /// Write a class tag as the first member of every class object, and read
    /// polymorphic members through it.
    pub emit_type_tags: bool,
    /// The types a class tag may name when decoding.
    pub scope: Arc<TypeScope>,
}

impl StructuralOptions {
    /// Tags off, scope with only the built-in types.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_type_tags(mut self, emit_type_tags: bool) -> Self {
        self.emit_type_tags = emit_type_tags;
        self
    }

    #[inline]
    pub fn with_scope(mut self, scope: impl Into<Arc<TypeScope>>) -> Self {
        self.scope = scope.into();
        self
    }
}

// -----------------------------------------------------------------------------
// TextOptions

/// How the text looks.
///
/// With the `serde` feature these can be kept in a host's configuration
/// files. Missing keys take their defaults:
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use ts_schema::TextOptions;
///
/// let options: TextOptions = serde_json::from_str(r#"{ "enum_as_string": true }"#).unwrap();
/// assert!(options.enum_as_string);
/// assert_eq!(options.class_tag, "class");
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TextOptions {
    /// Written after `{`, `[` and each `,`, and before `}` and `]`.
    pub field_separator: String,
    /// Written once per nesting level before each member and element.
    pub indent: String,
    /// The member name that carries the class tag.
    pub class_tag: String,
    /// Write enums by variant name instead of by ordinal.
    pub enum_as_string: bool,
    /// Write the element count first in fixed arrays.
    pub array_length_prefix: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            field_separator: String::from("\n"),
            indent: String::from("\t"),
            class_tag: String::from("class"),
            enum_as_string: false,
            array_length_prefix: false,
        }
    }
}

impl TextOptions {
    /// One line, no indentation.
    pub fn compact() -> Self {
        Self {
            field_separator: String::new(),
            indent: String::new(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_field_separator(mut self, field_separator: impl Into<String>) -> Self {
        self.field_separator = field_separator.into();
        self
    }

    #[inline]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    #[inline]
    pub fn with_class_tag(mut self, class_tag: impl Into<String>) -> Self {
        self.class_tag = class_tag.into();
        self
    }

    #[inline]
    pub fn with_enum_as_string(mut self, enum_as_string: bool) -> Self {
        self.enum_as_string = enum_as_string;
        self
    }

    #[inline]
    pub fn with_array_length_prefix(mut self, array_length_prefix: bool) -> Self {
        self.array_length_prefix = array_length_prefix;
        self
    }
}

// -----------------------------------------------------------------------------
// FormatOptions

/// Structural and text options together.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub structural: StructuralOptions,
    pub text: TextOptions,
}

impl FormatOptions {
    #[inline]
    pub fn new(structural: StructuralOptions, text: TextOptions) -> Self {
        Self { structural, text }
    }

    #[inline]
    pub fn with_structural(mut self, structural: StructuralOptions) -> Self {
        self.structural = structural;
        self
    }

    #[inline]
    pub fn with_text(mut self, text: TextOptions) -> Self {
        self.text = text;
        self
    }

    /// Shorthand for `self.structural.emit_type_tags`.
    #[inline]
    pub fn emit_type_tags(&self) -> bool {
        self.structural.emit_type_tags
    }
}
