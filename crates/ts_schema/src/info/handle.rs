use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{MemberDescriptor, ObjectKind};
use crate::object::{Described, Object};
use crate::registry::TypeScope;

/// A `Copy` identity of a described type.
///
/// The handle stores function pointers into the type's [`Described`]
/// implementation, so it can be created in a `const` context and carried
/// inside [`ValueKind::Object`](crate::info::ValueKind::Object) without
/// building any descriptor.
///
/// Two handles are equal when they name the same Rust type.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    type_id: fn() -> TypeId,
    type_path: fn() -> &'static str,
    rust_path: fn() -> &'static str,
    object_kind: fn() -> ObjectKind,
    members: fn() -> Vec<MemberDescriptor>,
    construct: fn() -> Box<dyn Object>,
    register: fn(&mut TypeScope),
}

fn construct<T: Described>() -> Box<dyn Object> {
    Box::new(T::default())
}

impl TypeHandle {
    /// Returns the handle of `T`.
    #[inline]
    pub const fn of<T: Described>() -> Self {
        Self {
            type_id: TypeId::of::<T>,
            type_path: T::type_path,
            rust_path: T::rust_path,
            object_kind: T::object_kind,
            members: T::members,
            construct: construct::<T>,
            register: T::register_members,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// The path written into class tags.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        (self.type_path)()
    }

    /// The last segment of [`type_path`](Self::type_path).
    pub fn type_name(&self) -> &'static str {
        let path = self.type_path();
        match path.rfind("::") {
            Some(index) => &path[index + 2..],
            None => path,
        }
    }

    /// The path generated code uses to name the type.
    #[inline]
    pub fn rust_path(&self) -> &'static str {
        (self.rust_path)()
    }

    #[inline]
    pub fn object_kind(&self) -> ObjectKind {
        (self.object_kind)()
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        self.object_kind() == ObjectKind::Class
    }

    /// Enumerates the members afresh. Prefer the cached
    /// [`SchemaRegistry`](crate::SchemaRegistry) descriptor.
    #[inline]
    pub fn members(&self) -> Vec<MemberDescriptor> {
        (self.members)()
    }

    /// Creates a default instance.
    #[inline]
    pub fn construct(&self) -> Box<dyn Object> {
        (self.construct)()
    }

    /// Registers the types this type's members refer to.
    #[inline]
    pub fn register_members(&self, scope: &mut TypeScope) {
        (self.register)(scope);
    }
}

impl PartialEq for TypeHandle {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeHandle").field(&self.type_path()).finish()
    }
}
