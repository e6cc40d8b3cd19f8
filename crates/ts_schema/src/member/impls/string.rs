use alloc::string::String;

use crate::error::NotationError;
use crate::info::ValueKind;
use crate::member::{MemberValue, shape_mismatch};
use crate::value::{Value, ValueRef};

impl MemberValue for String {
    const KIND: ValueKind = ValueKind::String;

    #[inline]
    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::Str(self)
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(shape_mismatch(&Self::KIND, &other)),
        }
    }
}
