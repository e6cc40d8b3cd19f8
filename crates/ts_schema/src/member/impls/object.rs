use alloc::boxed::Box;

use crate::error::NotationError;
use crate::info::{TypeHandle, ValueKind};
use crate::member::{MemberValue, shape_mismatch};
use crate::object::{Described, Object};
use crate::registry::TypeScope;
use crate::value::{Value, ValueRef};

/// A boxed described type, usually a class or a recursive member.
impl<T: Described> MemberValue for Box<T> {
    const KIND: ValueKind = ValueKind::Object(TypeHandle::of::<T>());

    #[inline]
    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::Object(&**self)
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        match value {
            Value::Object(object) => {
                let found = object.type_handle().type_path();
                object.downcast::<T>().ok_or_else(|| {
                    NotationError::unsupported(alloc::format!(
                        "expected `{}`, got `{found}`",
                        T::type_path()
                    ))
                })
            }
            other => Err(shape_mismatch(&Self::KIND, &other)),
        }
    }

    fn register_dependencies(scope: &mut TypeScope) {
        scope.register::<T>();
    }
}

/// Any described class, chosen by its class tag when decoding.
impl MemberValue for Box<dyn Object> {
    const KIND: ValueKind = ValueKind::Polymorphic;

    #[inline]
    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::Object(&**self)
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(shape_mismatch(&Self::KIND, &other)),
        }
    }
}
