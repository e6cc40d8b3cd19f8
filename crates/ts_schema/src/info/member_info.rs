use core::fmt;

use crate::error::NotationError;
use crate::info::ValueKind;
use crate::member::Member;
use crate::object::Object;
use crate::value::{Value, ValueRef};

/// Reads a member. `None` means the member is absent.
pub type Getter = for<'a> fn(&'a (dyn Object + 'static)) -> Option<ValueRef<'a>>;

/// Writes a member.
pub type Setter = fn(&mut (dyn Object + 'static), Value) -> Result<(), NotationError>;

/// One serializable member of a described type.
///
/// `#[derive(Notation)]` builds these with [`MemberDescriptor::of`]. A type can
/// also list its members by hand:
///
/// ```
/// use ts_schema::info::{MemberDescriptor, ValueKind};
/// use ts_schema::{NotationError, Object, Value, ValueRef};
///
/// #[derive(Default)]
/// struct Counter {
///     hits: u32,
/// }
///
/// fn get<'a>(object: &'a (dyn Object + 'static)) -> Option<ValueRef<'a>> {
///     # let _ = object;
///     // downcast `object` and return the field
///     # None
/// }
///
/// fn set(object: &mut (dyn Object + 'static), value: Value) -> Result<(), NotationError> {
///     # let _ = (object, value);
///     // downcast `object` and store the field
///     # Ok(())
/// }
///
/// let member = MemberDescriptor::new("hits", ValueKind::unsigned(u32::MAX as u64), get, set);
/// assert_eq!(member.name(), "hits");
/// assert!(!member.is_optional());
/// ```
#[derive(Clone, Copy)]
pub struct MemberDescriptor {
    name: &'static str,
    field: &'static str,
    kind: ValueKind,
    optional: bool,
    get: Getter,
    set: Setter,
}

impl MemberDescriptor {
    /// A required member whose Rust field has the same name as its wire name.
    #[inline]
    pub const fn new(name: &'static str, kind: ValueKind, get: Getter, set: Setter) -> Self {
        Self {
            name,
            field: name,
            kind,
            optional: false,
            get,
            set,
        }
    }

    /// A member stored in a field of type `M`. Kind and optionality come from `M`.
    #[inline]
    pub const fn of<M: Member>(
        name: &'static str,
        field: &'static str,
        get: Getter,
        set: Setter,
    ) -> Self {
        Self {
            name,
            field,
            kind: M::KIND,
            optional: M::OPTIONAL,
            get,
            set,
        }
    }

    #[inline]
    pub const fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    #[inline]
    pub const fn with_field(mut self, field: &'static str) -> Self {
        self.field = field;
        self
    }

    /// The wire name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The Rust field name.
    #[inline]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[inline]
    pub const fn kind(&self) -> &ValueKind {
        &self.kind
    }

    #[inline]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    #[inline]
    pub fn get<'a>(&self, object: &'a (dyn Object + 'static)) -> Option<ValueRef<'a>> {
        (self.get)(object)
    }

    #[inline]
    pub fn set(&self, object: &mut (dyn Object + 'static), value: Value) -> Result<(), NotationError> {
        (self.set)(object, value)
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}
