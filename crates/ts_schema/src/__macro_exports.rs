//! Items the derive expands to. Not a stable interface.

use alloc::boxed::Box;
use alloc::format;

use crate::error::NotationError;
use crate::member::{EnumMember, MemberValue, shape_mismatch};
use crate::object::{Described, Object};
use crate::value::Value;

/// Downcasts a setter's target.
#[inline]
pub fn downcast_target<'a, T: Described>(
    object: &'a mut (dyn Object + 'static),
) -> Result<&'a mut T, NotationError> {
    let found = object.type_handle().type_path();
    object.downcast_mut::<T>().ok_or_else(|| {
        NotationError::unsupported(format!(
            "a setter of `{}` was handed a `{found}`",
            T::type_path()
        ))
    })
}

/// `MemberValue::from_value` of a described struct.
#[inline]
pub fn object_from_value<T: Described>(value: Value) -> Result<T, NotationError> {
    <Box<T> as MemberValue>::from_value(value).map(|boxed| *boxed)
}

/// `MemberValue::from_value` of a described enum.
pub fn enum_from_value<T: EnumMember>(value: Value) -> Result<T, NotationError> {
    match value {
        Value::Enum(ordinal) => {
            let ordinal = T::DESCRIPTOR.resolve_ordinal(ordinal)?;
            T::from_ordinal(ordinal).ok_or_else(|| {
                NotationError::unsupported(format!(
                    "`{}` lists ordinal {ordinal} but has no such variant",
                    T::DESCRIPTOR.type_path()
                ))
            })
        }
        other => Err(shape_mismatch(&T::KIND, &other)),
    }
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::object::Described;
    use crate::registry::TypeScope;

    pub use inventory;

    /// One `#[notation(auto_register)]` type.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeScope));

    inventory::collect!(__AutoRegisterFunc);

    /// The function each auto-registered type submits.
    pub fn __register<T: Described>(scope: &mut TypeScope) {
        scope.register::<T>();
    }

    // Only runs if collection works on this platform.
    inventory::submit! {
        __AutoRegisterFunc(TypeScope::mark_auto_registered)
    }

    pub(crate) fn register_types(scope: &mut TypeScope) {
        for item in inventory::iter::<__AutoRegisterFunc> {
            (item.0)(scope);
        }
    }
}
