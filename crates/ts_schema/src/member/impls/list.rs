use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{NotationError, SchemaReason};
use crate::info::ValueKind;
use crate::member::{MemberValue, shape_mismatch};
use crate::registry::TypeScope;
use crate::value::{Value, ValueRef};

fn elements<T: MemberValue>(kind: &ValueKind, value: Value) -> Result<Vec<T>, NotationError> {
    match value {
        Value::List(items) => items.into_iter().map(T::from_value).collect(),
        other => Err(shape_mismatch(kind, &other)),
    }
}

impl<T: MemberValue> MemberValue for Vec<T> {
    const KIND: ValueKind = ValueKind::Sequence(&T::KIND);

    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::List(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        elements(&Self::KIND, value)
    }

    fn register_dependencies(scope: &mut TypeScope) {
        T::register_dependencies(scope);
    }
}

impl<T: MemberValue> MemberValue for Box<[T]> {
    const KIND: ValueKind = ValueKind::Array {
        element: &T::KIND,
        len: None,
    };

    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::List(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        elements(&Self::KIND, value).map(Vec::into_boxed_slice)
    }

    fn register_dependencies(scope: &mut TypeScope) {
        T::register_dependencies(scope);
    }
}

impl<T: MemberValue, const N: usize> MemberValue for [T; N] {
    const KIND: ValueKind = ValueKind::Array {
        element: &T::KIND,
        len: Some(N),
    };

    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::List(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        let items = elements::<T>(&Self::KIND, value)?;
        <[T; N]>::try_from(items).map_err(|items| {
            NotationError::schema(SchemaReason::ArrayLength {
                expected: N,
                found: items.len(),
            })
        })
    }

    fn register_dependencies(scope: &mut TypeScope) {
        T::register_dependencies(scope);
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::info::ValueKind;
    use crate::member::MemberValue;
    use crate::value::{Value, ValueRef};
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn nested_kinds_are_const() {
        const KIND: ValueKind = <Vec<[u8; 2]>>::KIND;
        let ValueKind::Sequence(ValueKind::Array { element, len }) = KIND else {
            panic!("unexpected kind {KIND}");
        };
        assert_eq!(*len, Some(2));
        assert_eq!(**element, ValueKind::UInt { max: 255 });
        assert_eq!(<Box<[f32]>>::KIND, ValueKind::Array { element: &ValueKind::Float, len: None });
    }

    #[test]
    fn fixed_arrays_check_length() {
        let ok = <[i32; 2]>::from_value(Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(ok, Ok([1, 2]));

        let err = <[i32; 2]>::from_value(Value::List(vec![Value::Int(1)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn lists_borrow_elements() {
        let names = vec![alloc::string::String::from("a")];
        assert_eq!(names.to_value(), ValueRef::List(vec![ValueRef::Str("a")]));
    }
}
