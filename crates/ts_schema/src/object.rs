use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::error::NotationError;
use crate::info::{MemberDescriptor, ObjectKind, TypeHandle, ValueKind};
use crate::member::MemberValue;
use crate::registry::TypeScope;
use crate::value::{Value, ValueRef};

// -----------------------------------------------------------------------------
// Object

/// A value whose members can be enumerated at runtime.
///
/// This is the object-safe half of the member service: the encoder and the
/// interpreted decoder only ever see `&dyn Object`. Implemented by
/// `#[derive(Notation)]` on structs.
pub trait Object: Any + Send + Sync {
    /// The handle of the concrete type behind `self`.
    fn type_handle(&self) -> TypeHandle;
}

impl dyn Object {
    /// Returns `true` if the concrete type is `T`.
    #[inline]
    pub fn is<T: Object>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }

    /// Takes the concrete value out of the box. `None` if it is not a `T`.
    #[inline]
    pub fn downcast<T: Object>(self: Box<Self>) -> Option<Box<T>> {
        let any: Box<dyn Any> = self;
        any.downcast().ok()
    }
}

/// Structural equality: same concrete type and equal members.
impl PartialEq for dyn Object {
    fn eq(&self, other: &Self) -> bool {
        let handle = self.type_handle();
        handle == other.type_handle()
            && handle
                .members()
                .iter()
                .all(|member| member.get(self) == member.get(other))
    }
}

impl fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handle = self.type_handle();
        let mut out = f.debug_struct(handle.type_name());
        for member in handle.members() {
            if let Some(value) = member.get(self) {
                out.field(member.name(), &value);
            }
        }
        out.finish()
    }
}

impl Default for Box<dyn Object> {
    /// An [`EmptyObject`], so that structs with a required polymorphic member
    /// can still derive `Default`.
    fn default() -> Self {
        Box::new(EmptyObject)
    }
}

// -----------------------------------------------------------------------------
// Described

/// Static access to a type's members.
///
/// Both decoders construct a [`Default`] instance and then assign members in
/// order, so every described type is `Default`.
pub trait Described: Object + Default {
    /// The name written into class tags and looked up by
    /// [`TypeScope::resolve`]. Usually the module path plus the type name.
    fn type_path() -> &'static str;

    /// The path generated source uses for this type.
    fn rust_path() -> &'static str {
        Self::type_path()
    }

    fn object_kind() -> ObjectKind {
        ObjectKind::Struct
    }

    /// Members in declaration order.
    fn members() -> Vec<MemberDescriptor>;

    /// Registers the types referenced by members into `scope`.
    fn register_members(_scope: &mut TypeScope) {}
}

// -----------------------------------------------------------------------------
// EmptyObject

/// A class with no members.
///
/// It is the default of `Box<dyn Object>`, and serves as an example of a
/// hand-written description.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmptyObject;

impl Object for EmptyObject {
    fn type_handle(&self) -> TypeHandle {
        TypeHandle::of::<Self>()
    }
}

impl Described for EmptyObject {
    fn type_path() -> &'static str {
        "ts_schema::EmptyObject"
    }

    fn object_kind() -> ObjectKind {
        ObjectKind::Class
    }

    fn members() -> Vec<MemberDescriptor> {
        Vec::new()
    }
}

impl MemberValue for EmptyObject {
    const KIND: ValueKind = ValueKind::Object(TypeHandle::of::<Self>());

    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        crate::__macro_exports::object_from_value(value)
    }

    fn register_dependencies(scope: &mut TypeScope) {
        scope.register::<Self>();
    }
}

#[cfg(test)]
mod tests {
    use super::{EmptyObject, Object};
    use crate::derive::Notation;
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;

    #[derive(Notation, Default, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
        label: Option<String>,
    }

    #[test]
    fn downcast_round_trip() {
        let boxed: Box<dyn Object> = Box::new(Point { x: 1, y: 2, label: None });
        assert!(boxed.is::<Point>());
        assert!(boxed.downcast_ref::<EmptyObject>().is_none());
        assert_eq!(boxed.downcast_ref::<Point>().map(|p| p.y), Some(2));

        let point = boxed.downcast::<Point>().unwrap();
        assert_eq!(point.x, 1);

        let empty: Box<dyn Object> = Box::default();
        assert!(empty.downcast::<Point>().is_none());
    }

    #[test]
    fn structural_equality_and_debug() {
        let a: Box<dyn Object> = Box::new(Point { x: 1, y: 2, label: Some("a".into()) });
        let b: Box<dyn Object> = Box::new(Point { x: 1, y: 2, label: Some("a".into()) });
        let c: Box<dyn Object> = Box::new(Point { x: 1, y: 3, label: Some("a".into()) });
        assert!(a == b);
        assert!(a != c);
        assert!(a != Box::<dyn Object>::default());

        assert_eq!(format!("{a:?}"), r#"Point { x: Int(1), y: Int(2), label: Str("a") }"#);
        assert_eq!(format!("{:?}", Box::<dyn Object>::default()), "EmptyObject");
    }
}
