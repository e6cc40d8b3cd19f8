use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use ts_schema::info::{TypeDescriptor, ValueKind};
use ts_schema::{FormatOptions, FormatReason, NotationError, SchemaReason, SchemaRegistry};
use ts_schema::{Object, TypeHandle, Value};

use crate::reader::Reader;

/// Objects may nest this deep. Deeper input is a format error.
///
/// Every level costs a few recursive frames on the caller's stack, so the
/// bound must hold on a default 2 MiB thread in unoptimized builds.
pub const MAX_DEPTH: usize = 128;

/// Elements reserved up front for a length-prefixed array. The count comes
/// from the input, so larger arrays grow as they are read.
#[inline]
pub fn capacity(count: u64) -> usize {
    usize::try_from(count).map_or(1024, |count| count.min(1024))
}

/// The state of one decode call.
///
/// The interpreted decoder walks descriptors through it, and compiled
/// decoders call its grammar steps directly. Both paths share every step
/// that can fail, so they fail at the same offset with the same error.
pub struct Session<'a> {
    reader: Reader<'a>,
    registry: &'a SchemaRegistry,
    options: &'a FormatOptions,
    depth: usize,
    #[cfg(feature = "debug")]
    members: super::member_stack::MemberStack,
}

impl<'a> Session<'a> {
    pub fn new(text: &'a str, registry: &'a SchemaRegistry, options: &'a FormatOptions) -> Self {
        Self {
            reader: Reader::new(text),
            registry,
            options,
            depth: 0,
            #[cfg(feature = "debug")]
            members: super::member_stack::MemberStack::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> &'a FormatOptions {
        self.options
    }

    #[inline]
    pub fn registry(&self) -> &'a SchemaRegistry {
        self.registry
    }

    #[cfg(feature = "debug")]
    pub(crate) fn members(&self) -> &super::member_stack::MemberStack {
        &self.members
    }

    // -------------------------------------------------------------------------
    // Tokens

    #[inline]
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    #[inline]
    pub fn require(&mut self, expected: &'static str) -> Result<char, NotationError> {
        self.reader.require(expected)
    }

    #[inline]
    pub fn require_string(&mut self) -> Result<String, NotationError> {
        self.reader.require_string()
    }

    #[inline]
    pub fn require_int(&mut self) -> Result<i64, NotationError> {
        self.reader.require_int()
    }

    #[inline]
    pub fn require_uint(&mut self) -> Result<u64, NotationError> {
        self.reader.require_uint()
    }

    #[inline]
    pub fn require_single(&mut self) -> Result<f32, NotationError> {
        self.reader.require_single()
    }

    #[inline]
    pub fn require_double(&mut self) -> Result<f64, NotationError> {
        self.reader.require_double()
    }

    #[inline]
    pub fn next_member_name(&mut self, first: bool) -> Result<Option<String>, NotationError> {
        self.reader.next_member_name(first)
    }

    pub(crate) fn finish(&mut self) -> Result<(), NotationError> {
        self.reader.finish()
    }

    // -------------------------------------------------------------------------
    // Lists

    /// Reads `[`. Returns `false` if the list is empty, in which case the
    /// `]` has been read too.
    pub fn begin_list(&mut self) -> Result<bool, NotationError> {
        self.require("[")?;
        if self.reader.peek_non_space()? == Some(']') {
            self.require("]")?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Reads the `,` or `]` after an element. Returns `true` if another
    /// element follows.
    #[inline]
    pub fn next_element(&mut self) -> Result<bool, NotationError> {
        Ok(self.require("],")? == ',')
    }

    /// Reads `[` and the element count of a length-prefixed array. `None`
    /// for `[]`, which has been read completely.
    pub fn begin_prefixed(&mut self) -> Result<Option<u64>, NotationError> {
        self.require("[")?;
        if self.reader.peek_non_space()? == Some(']') {
            self.require("]")?;
            return Ok(None);
        }
        self.require_uint().map(Some)
    }

    // -------------------------------------------------------------------------
    // Objects

    /// Reads `{` and the first member name.
    pub fn begin_object(&mut self) -> Result<Option<String>, NotationError> {
        self.require("{")?;
        if self.depth >= MAX_DEPTH {
            return Err(NotationError::format(
                FormatReason::TooDeep(MAX_DEPTH),
                self.position() - 1,
            ));
        }
        self.depth += 1;
        self.next_member_name(true)
    }

    /// Rejects a member name left over after the last member, then reads `}`.
    pub fn finish_object(
        &mut self,
        name: Option<String>,
        type_path: &'static str,
    ) -> Result<(), NotationError> {
        if let Some(name) = name {
            return Err(
                NotationError::schema(SchemaReason::UnexpectedMember { type_path, name })
                    .or_at(self.position()),
            );
        }
        self.require("}")?;
        self.depth -= 1;
        Ok(())
    }

    /// Fails unless `name` is the required member `member`.
    ///
    /// A name that belongs to a later member means `member` was left out, any
    /// other name is unexpected.
    pub fn expect_member(
        &self,
        name: &Option<String>,
        member: &'static str,
        type_path: &'static str,
        members: &[&str],
    ) -> Result<(), NotationError> {
        match name.as_deref() {
            Some(found) if found == member => Ok(()),
            Some(found) if !members.contains(&found) => Err(NotationError::schema(
                SchemaReason::UnexpectedMember {
                    type_path,
                    name: String::from(found),
                },
            )
            .or_at(self.position())),
            _ => Err(
                NotationError::schema(SchemaReason::MissingMember { type_path, member })
                    .or_at(self.position()),
            ),
        }
    }

    /// Reads the value of the class tag, which must be the first member.
    /// Returns the tag and its offset.
    fn read_class_tag(&mut self, name: Option<String>) -> Result<(String, usize), NotationError> {
        let options = self.options;
        let class_tag = &options.text.class_tag;
        match name {
            Some(name) if name == *class_tag => {
                let at = self.position();
                Ok((self.require_string()?, at))
            }
            found => Err(NotationError::schema(SchemaReason::MissingClassTag {
                tag: class_tag.clone(),
                found,
            })
            .or_at(self.position())),
        }
    }

    /// Reads the class tag of an object whose type is already known and
    /// returns the name of the member after it.
    pub fn expect_class_tag(
        &mut self,
        name: Option<String>,
        type_path: &'static str,
    ) -> Result<Option<String>, NotationError> {
        let (tag, at) = self.read_class_tag(name)?;
        if tag != type_path {
            let err = match self.options.structural.scope.resolve(&tag) {
                Some(_) => NotationError::schema(SchemaReason::TypeMismatch {
                    expected: type_path,
                    found: tag,
                }),
                None => NotationError::UnknownType {
                    name: tag,
                    offset: None,
                },
            };
            return Err(err.or_at(at));
        }
        self.next_member_name(false)
    }

    /// Reads an object whose type is named by its class tag.
    pub fn read_polymorphic(&mut self) -> Result<Box<dyn Object>, NotationError> {
        if !self.options.emit_type_tags() {
            return Err(NotationError::schema(SchemaReason::TypeTagsRequired).or_at(self.position()));
        }

        let name = self.begin_object()?;
        let (tag, at) = self.read_class_tag(name)?;
        let Some(handle) = self.options.structural.scope.resolve(&tag) else {
            return Err(NotationError::UnknownType {
                name: tag,
                offset: Some(at),
            });
        };

        let descriptor = self.registry.get_handle(handle);
        descriptor
            .check_class_tag(&self.options.text.class_tag)
            .map_err(|err| err.or_at(at))?;

        let name = self.next_member_name(false)?;
        let mut object = handle.construct();
        let name = self.read_fields(&descriptor, &mut *object, name)?;
        self.finish_object(name, descriptor.type_path())?;
        Ok(object)
    }

    /// Reads an object of a known type into a fresh instance.
    pub(crate) fn read_object(&mut self, handle: TypeHandle) -> Result<Box<dyn Object>, NotationError> {
        let mut object = handle.construct();
        self.read_object_into(&mut *object, handle)?;
        Ok(object)
    }

    /// Reads an object of a known type into `object`. Optional members the
    /// text leaves out are not touched.
    pub(crate) fn read_object_into(
        &mut self,
        object: &mut (dyn Object + 'static),
        handle: TypeHandle,
    ) -> Result<(), NotationError> {
        let descriptor = self.registry.get_handle(handle);
        let tagged = self.options.emit_type_tags() && descriptor.is_class();
        if tagged {
            descriptor
                .check_class_tag(&self.options.text.class_tag)
                .map_err(|err| err.or_at(self.position()))?;
        }

        let mut name = self.begin_object()?;
        if tagged {
            name = self.expect_class_tag(name, descriptor.type_path())?;
        }
        let name = self.read_fields(&descriptor, object, name)?;
        self.finish_object(name, descriptor.type_path())
    }

    /// Matches member names against the descriptor in order. Absent optional
    /// members are skipped without consuming input. Returns the name read
    /// after the last member, if any.
    fn read_fields(
        &mut self,
        descriptor: &TypeDescriptor,
        object: &mut (dyn Object + 'static),
        mut name: Option<String>,
    ) -> Result<Option<String>, NotationError> {
        for member in descriptor.members() {
            if name.as_deref() == Some(member.name()) {
                let at = self.position();

                #[cfg(feature = "debug")]
                self.members.push(descriptor.type_path(), member.name());

                let value = self.read_value(member.kind(), at)?;
                member.set(object, value).map_err(|err| err.or_at(at))?;

                #[cfg(feature = "debug")]
                self.members.pop();

                name = self.next_member_name(false)?;
            } else if !member.is_optional() {
                return Err(member_error(descriptor, member.name(), name, self.position()));
            }
        }
        Ok(name)
    }

    // -------------------------------------------------------------------------
    // Values

    /// Reads one value of `kind`. `at` is where the value starts; range and
    /// length violations are reported there.
    fn read_value(&mut self, kind: &ValueKind, at: usize) -> Result<Value, NotationError> {
        Ok(match *kind {
            ValueKind::Sequence(element) => Value::List(self.read_list(element)?),
            ValueKind::Array { element, len } => Value::List(self.read_array(element, len, at)?),
            ValueKind::Object(handle) => Value::Object(self.read_object(handle)?),
            ValueKind::Polymorphic => Value::Object(self.read_polymorphic()?),
            _ => self.read_scalar(kind, at)?,
        })
    }

    // Kept out of `read_value` so the recursive frames stay small.
    #[inline(never)]
    fn read_scalar(&mut self, kind: &ValueKind, at: usize) -> Result<Value, NotationError> {
        let overflow = || NotationError::format(FormatReason::IntegerOverflow, at);

        Ok(match *kind {
            ValueKind::Int { min, max } => {
                let value = self.require_int()?;
                if value < min || value > max {
                    return Err(overflow());
                }
                Value::Int(value)
            }
            ValueKind::UInt { max } => {
                let value = self.require_uint()?;
                if value > max {
                    return Err(overflow());
                }
                Value::UInt(value)
            }
            ValueKind::Float => Value::Float(self.require_single()?),
            ValueKind::Double => Value::Double(self.require_double()?),
            ValueKind::String => Value::String(self.require_string()?),
            ValueKind::Enum(info) => {
                let ordinal = if self.options.text.enum_as_string {
                    info.resolve_name(self.require_string()?)
                } else {
                    info.resolve_ordinal(self.require_int()?)
                };
                Value::Enum(ordinal.map_err(|err| err.or_at(at))?)
            }
            ValueKind::Sequence(_)
            | ValueKind::Array { .. }
            | ValueKind::Object(_)
            | ValueKind::Polymorphic => {
                return Err(NotationError::DecoderState {
                    detail: "composite kind passed to the scalar reader",
                    offset: Some(at),
                });
            }
        })
    }

    fn read_array(
        &mut self,
        element: &ValueKind,
        len: Option<usize>,
        at: usize,
    ) -> Result<Vec<Value>, NotationError> {
        let items = if self.options.text.array_length_prefix {
            self.read_prefixed(element)?
        } else {
            self.read_list(element)?
        };
        if let Some(expected) = len
            && items.len() != expected
        {
            return Err(NotationError::schema(SchemaReason::ArrayLength {
                expected,
                found: items.len(),
            })
            .or_at(at));
        }
        Ok(items)
    }

    fn read_list(&mut self, element: &ValueKind) -> Result<Vec<Value>, NotationError> {
        let mut items = Vec::new();
        if self.begin_list()? {
            loop {
                let at = self.position();
                items.push(self.read_value(element, at)?);
                if !self.next_element()? {
                    break;
                }
            }
        }
        Ok(items)
    }

    fn read_prefixed(&mut self, element: &ValueKind) -> Result<Vec<Value>, NotationError> {
        let mut items = Vec::new();
        if let Some(count) = self.begin_prefixed()? {
            items.reserve(capacity(count));
            for _ in 0..count {
                self.require(",")?;
                let at = self.position();
                items.push(self.read_value(element, at)?);
            }
            self.require("]")?;
        }
        Ok(items)
    }
}

/// The error for a required member that the text does not supply at `at`.
#[cold]
fn member_error(
    descriptor: &TypeDescriptor,
    member: &'static str,
    found: Option<String>,
    at: usize,
) -> NotationError {
    let type_path = descriptor.type_path();
    let reason = match found {
        Some(name) if descriptor.member(&name).is_none() => {
            SchemaReason::UnexpectedMember { type_path, name }
        }
        _ => SchemaReason::MissingMember { type_path, member },
    };
    NotationError::schema(reason).or_at(at)
}
