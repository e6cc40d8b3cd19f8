//! The encoder.

use alloc::string::String;
use core::fmt;
use std::io;

use ts_schema::info::ValueKind;
use ts_schema::{Described, FormatOptions, FormatReason, NotationError, Object, SchemaReason, SchemaRegistry, ValueRef};

/// Writes described objects as text.
///
/// Objects are written member by member in declaration order. Absent
/// optional members are left out. Class objects carry a class tag as their
/// first member when type tags are on, and so does every object written into
/// a polymorphic member.
///
/// # Example
///
/// ```
/// use ts_schema::{derive::Notation, FormatOptions, SchemaRegistry, TextOptions};
/// use ts_text::Encoder;
///
/// #[derive(Notation, Default)]
/// struct Sample {
///     id: u32,
///     names: Vec<String>,
///     ratio: Option<f64>,
/// }
///
/// let registry = SchemaRegistry::new();
/// let options = FormatOptions::default().with_text(TextOptions::compact());
/// let sample = Sample { id: 3, names: vec!["a\"b".into()], ratio: None };
///
/// let text = Encoder::new(&registry, &options).encode(&sample).unwrap();
/// assert_eq!(text, r#"{"id":3,"names":["a\"b"]}"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    registry: &'a SchemaRegistry,
    options: &'a FormatOptions,
}

impl<'a> Encoder<'a> {
    #[inline]
    pub const fn new(registry: &'a SchemaRegistry, options: &'a FormatOptions) -> Self {
        Self { registry, options }
    }

    #[inline]
    pub fn options(&self) -> &'a FormatOptions {
        self.options
    }

    /// Encodes `value` into a new string.
    #[inline]
    pub fn encode<T: Described>(&self, value: &T) -> Result<String, NotationError> {
        self.encode_dyn(value)
    }

    /// Encodes an object of any described type.
    pub fn encode_dyn(&self, value: &(dyn Object + 'static)) -> Result<String, NotationError> {
        let mut out = String::new();
        self.encode_to(&mut out, value)?;
        Ok(out)
    }

    /// Encodes `value` with a class tag even if its type is not a class, so
    /// that [`Decoder::decode_tagged`](crate::Decoder::decode_tagged) can read
    /// it back. Without type tags this is the same as
    /// [`encode_dyn`](Self::encode_dyn).
    pub fn encode_tagged(&self, value: &(dyn Object + 'static)) -> Result<String, NotationError> {
        let mut out = String::new();
        self.writer(&mut out).write_object(value, 0, true)?;
        Ok(out)
    }

    /// Appends the text of `value` to `out`.
    pub fn encode_to(&self, out: &mut impl fmt::Write, value: &(dyn Object + 'static)) -> Result<(), NotationError> {
        self.writer(out).write_object(value, 0, false)
    }

    /// Streams the text of `value` into `writer`.
    pub fn encode_to_writer(&self, writer: impl io::Write, value: &(dyn Object + 'static)) -> Result<(), NotationError> {
        let mut sink = IoSink {
            inner: writer,
            error: None,
        };
        let result = self.encode_to(&mut sink, value);
        match sink.error.take() {
            Some(err) => Err(err.into()),
            None => result,
        }
    }

    fn writer<'w, W: fmt::Write>(&self, out: &'w mut W) -> Writer<'w, 'a, W> {
        Writer {
            out,
            registry: self.registry,
            options: self.options,
        }
    }
}

/// `fmt::Write` over an `io::Write`, keeping the first I/O error.
struct IoSink<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> fmt::Write for IoSink<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error.get_or_insert(err);
            fmt::Error
        })
    }
}

struct Writer<'w, 'a, W> {
    out: &'w mut W,
    registry: &'a SchemaRegistry,
    options: &'a FormatOptions,
}

impl<W: fmt::Write> Writer<'_, '_, W> {
    fn indent(&mut self, level: usize) -> fmt::Result {
        for _ in 0..level {
            self.out.write_str(&self.options.text.indent)?;
        }
        Ok(())
    }

    /// Writes what goes before an element or member on `level`.
    fn separate(&mut self, first: &mut bool, level: usize) -> fmt::Result {
        if !*first {
            self.out.write_char(',')?;
        }
        *first = false;
        self.out.write_str(&self.options.text.field_separator)?;
        self.indent(level)
    }

    /// Writes what goes before the closing delimiter of a container on `level`.
    fn close(&mut self, delimiter: char, empty: bool, level: usize) -> fmt::Result {
        if !empty {
            self.out.write_str(&self.options.text.field_separator)?;
            self.indent(level)?;
        }
        self.out.write_char(delimiter)
    }

    fn write_string(&mut self, text: &str) -> fmt::Result {
        self.out.write_char('"')?;
        for ch in text.chars() {
            match ch {
                '"' => self.out.write_str("\\\"")?,
                '\\' => self.out.write_str("\\\\")?,
                '\n' => self.out.write_str("\\n")?,
                '\t' => self.out.write_str("\\t")?,
                ch => self.out.write_char(ch)?,
            }
        }
        self.out.write_char('"')
    }

    fn write_name(&mut self, name: &str, first: &mut bool, level: usize) -> fmt::Result {
        self.separate(first, level)?;
        self.write_string(name)?;
        self.out.write_char(':')
    }

    /// Writes an object whose braces sit on `level`. `polymorphic` objects
    /// are tagged whatever their kind.
    fn write_object(&mut self, object: &(dyn Object + 'static), level: usize, polymorphic: bool) -> Result<(), NotationError> {
        let descriptor = self.registry.get_handle(object.type_handle());
        let options = self.options;
        let tagged = options.emit_type_tags() && (polymorphic || descriptor.is_class());
        if tagged {
            descriptor.check_class_tag(&options.text.class_tag)?;
        }

        self.out.write_char('{')?;
        let mut first = true;
        if tagged {
            self.write_name(&options.text.class_tag, &mut first, level + 1)?;
            self.write_string(descriptor.type_path())?;
        }
        for member in descriptor.members() {
            let Some(value) = member.get(object) else {
                continue;
            };
            self.write_name(member.name(), &mut first, level + 1)?;
            self.write_value(member.kind(), &value, level + 1)?;
        }
        self.close('}', first, level)?;
        Ok(())
    }

    fn write_list(
        &mut self,
        element: &ValueKind,
        items: &[ValueRef<'_>],
        level: usize,
        prefixed: bool,
    ) -> Result<(), NotationError> {
        self.out.write_char('[')?;
        let mut first = true;
        if prefixed && !items.is_empty() {
            write!(self.out, "{}", items.len())?;
            first = false;
        }
        for item in items {
            self.separate(&mut first, level + 1)?;
            self.write_value(element, item, level + 1)?;
        }
        self.close(']', items.is_empty(), level)?;
        Ok(())
    }

    /// Writes a member value or list element that starts on `level`.
    fn write_value(&mut self, kind: &ValueKind, value: &ValueRef<'_>, level: usize) -> Result<(), NotationError> {
        let options = self.options;
        match (kind, value) {
            (ValueKind::Int { .. }, ValueRef::Int(v)) => write!(self.out, "{v}")?,
            (ValueKind::UInt { .. }, ValueRef::UInt(v)) => write!(self.out, "{v}")?,
            (ValueKind::Float, ValueRef::Float(v)) => {
                if !v.is_finite() {
                    return Err(non_finite(f64::from(*v)));
                }
                write!(self.out, "{v}")?;
            }
            (ValueKind::Double, ValueRef::Double(v)) => {
                if !v.is_finite() {
                    return Err(non_finite(*v));
                }
                write!(self.out, "{v}")?;
            }
            (ValueKind::String, ValueRef::Str(s)) => self.write_string(s)?,
            (ValueKind::Enum(info), ValueRef::Enum(ordinal)) => {
                if options.text.enum_as_string {
                    let name = info.name_of(*ordinal).ok_or_else(|| {
                        NotationError::unsupported(alloc::format!(
                            "`{}` has no variant with ordinal {ordinal}",
                            info.type_path()
                        ))
                    })?;
                    self.write_string(name)?;
                } else {
                    write!(self.out, "{ordinal}")?;
                }
            }
            (ValueKind::Sequence(element), ValueRef::List(items)) => {
                self.write_list(element, items, level, false)?;
            }
            (ValueKind::Array { element, .. }, ValueRef::List(items)) => {
                self.write_list(element, items, level, options.text.array_length_prefix)?;
            }
            (ValueKind::Object(_), ValueRef::Object(object)) => self.write_object(*object, level, false)?,
            (ValueKind::Polymorphic, ValueRef::Object(object)) => {
                // Without a tag the text names no type to read it back as.
                if !options.emit_type_tags() {
                    return Err(NotationError::schema(SchemaReason::TypeTagsRequired));
                }
                self.write_object(*object, level, true)?;
            }
            (kind, value) => return Err(mismatch(kind, value)),
        }
        Ok(())
    }
}

#[inline]
fn non_finite(value: f64) -> NotationError {
    NotationError::Format {
        reason: FormatReason::NonFiniteFloat(value),
        offset: None,
    }
}

fn mismatch(kind: &ValueKind, value: &ValueRef<'_>) -> NotationError {
    NotationError::unsupported(alloc::format!(
        "a {kind} member produced a {} value",
        value.describe()
    ))
}
