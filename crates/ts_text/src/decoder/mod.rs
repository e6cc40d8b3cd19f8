//! The interpreted decoder.
//!
//! [`Decoder`] walks the cached [`TypeDescriptor`](ts_schema::TypeDescriptor)
//! of the target type and dispatches on each member's
//! [`ValueKind`](ts_schema::ValueKind). [`Session`] holds the state of one
//! call and is shared with compiled decoders.

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "debug")]
mod member_stack;
mod session;

// -----------------------------------------------------------------------------
// Exports

pub use session::{MAX_DEPTH, Session, capacity};

use alloc::boxed::Box;
use alloc::string::String;
use std::io;

use ts_schema::{Described, FormatOptions, NotationError, Object, SchemaReason, SchemaRegistry};
use ts_schema::TypeHandle;

use crate::compiled::CompiledDecoder;

/// Reads text written by the [`Encoder`](crate::Encoder).
///
/// Decoders borrow a registry and options, hold no other state, and can be
/// shared between threads.
///
/// # Example
///
/// ```
/// use ts_schema::{derive::Notation, ErrorKind, FormatOptions, SchemaRegistry};
/// use ts_text::Decoder;
///
/// #[derive(Notation, Default, Debug, PartialEq)]
/// struct Record {
///     id: i32,
///     name: String,
///     tag: Option<String>,
/// }
///
/// let registry = SchemaRegistry::new();
/// let options = FormatOptions::default();
/// let decoder = Decoder::new(&registry, &options);
///
/// let record: Record = decoder.decode(r#"{"id":5,"name":"abc"}"#).unwrap();
/// assert_eq!(record, Record { id: 5, name: "abc".into(), tag: None });
///
/// let err = decoder.decode::<Record>(r#"{"id":5}"#).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Schema);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    registry: &'a SchemaRegistry,
    options: &'a FormatOptions,
}

impl<'a> Decoder<'a> {
    #[inline]
    pub const fn new(registry: &'a SchemaRegistry, options: &'a FormatOptions) -> Self {
        Self { registry, options }
    }

    #[inline]
    pub fn options(&self) -> &'a FormatOptions {
        self.options
    }

    /// Runs `read` over `text` and requires that nothing but whitespace
    /// follows the root object.
    fn run<T>(
        &self,
        text: &str,
        read: impl FnOnce(&mut Session<'_>) -> Result<T, NotationError>,
    ) -> Result<T, NotationError> {
        let mut session = Session::new(text, self.registry, self.options);
        let result = read(&mut session).and_then(|value| {
            session.finish()?;
            Ok(value)
        });

        if let Err(err) = &result {
            #[cfg(feature = "debug")]
            if !session.members().is_empty() {
                log::debug!("decode failed: {err} (while reading {:?})", session.members());
                return result;
            }
            log::debug!("decode failed: {err}");
        }
        result
    }

    /// Decodes an object of type `T`.
    pub fn decode<T: Described>(&self, text: &str) -> Result<T, NotationError> {
        let object = self.decode_dyn(text, TypeHandle::of::<T>())?;
        match object.downcast::<T>() {
            Some(value) => Ok(*value),
            None => Err(NotationError::unsupported(alloc::format!(
                "`{}` constructed a different type",
                T::type_path()
            ))),
        }
    }

    /// Decodes an object of the type behind `handle`.
    pub fn decode_dyn(&self, text: &str, handle: TypeHandle) -> Result<Box<dyn Object>, NotationError> {
        self.run(text, |session| session.read_object(handle))
    }

    /// Decodes an object whose type is named by its class tag.
    ///
    /// Requires type tags; the tag is resolved through the scope.
    pub fn decode_tagged(&self, text: &str) -> Result<Box<dyn Object>, NotationError> {
        self.run(text, |session| session.read_polymorphic())
    }

    /// Decodes into an existing value.
    ///
    /// Optional members the text leaves out keep their current value. On
    /// failure `target` is left as it was.
    pub fn decode_into<T: Described + Clone>(&self, target: &mut T, text: &str) -> Result<(), NotationError> {
        let mut scratch = target.clone();
        self.run(text, |session| {
            session.read_object_into(&mut scratch, TypeHandle::of::<T>())
        })?;
        *target = scratch;
        Ok(())
    }

    /// Reads all of `reader` and decodes it as `T`.
    pub fn decode_from_reader<T: Described>(&self, mut reader: impl io::Read) -> Result<T, NotationError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.decode(&text)
    }

    /// Decodes with a compiled decoder.
    ///
    /// The decoder must have been generated for the same text options and
    /// the same type tag setting as this decoder's options.
    pub fn decode_compiled<D: CompiledDecoder>(&self, text: &str) -> Result<D::Output, NotationError> {
        self.check_compiled::<D>()?;
        self.run(text, |session| D::read_object(session))
    }

    fn check_compiled<D: CompiledDecoder>(&self) -> Result<(), NotationError> {
        let text = &self.options.text;
        let option = if D::EMIT_TYPE_TAGS != self.options.emit_type_tags() {
            "emit_type_tags"
        } else if D::CLASS_TAG != text.class_tag {
            "class_tag"
        } else if D::ENUM_AS_STRING != text.enum_as_string {
            "enum_as_string"
        } else if D::ARRAY_LENGTH_PREFIX != text.array_length_prefix {
            "array_length_prefix"
        } else {
            return Ok(());
        };
        Err(NotationError::schema(SchemaReason::OptionsMismatch {
            type_path: D::TYPE_PATH,
            option,
        }))
    }
}
