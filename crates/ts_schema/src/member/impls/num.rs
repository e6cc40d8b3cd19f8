use crate::error::{FormatReason, NotationError};
use crate::info::ValueKind;
use crate::member::{MemberValue, shape_mismatch};
use crate::value::{Value, ValueRef};

// Range errors carry no offset here; the decoder fills it in.
#[inline]
fn overflow() -> NotationError {
    NotationError::Format {
        reason: FormatReason::IntegerOverflow,
        offset: None,
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl MemberValue for $ty {
            const KIND: ValueKind = ValueKind::signed(<$ty>::MIN as i64, <$ty>::MAX as i64);

            #[inline]
            fn to_value(&self) -> ValueRef<'_> {
                ValueRef::Int(*self as i64)
            }

            fn from_value(value: Value) -> Result<Self, NotationError> {
                match value {
                    Value::Int(v) => <$ty>::try_from(v).map_err(|_| overflow()),
                    other => Err(shape_mismatch(&Self::KIND, &other)),
                }
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl MemberValue for $ty {
            const KIND: ValueKind = ValueKind::unsigned(<$ty>::MAX as u64);

            #[inline]
            fn to_value(&self) -> ValueRef<'_> {
                ValueRef::UInt(*self as u64)
            }

            fn from_value(value: Value) -> Result<Self, NotationError> {
                match value {
                    Value::UInt(v) => <$ty>::try_from(v).map_err(|_| overflow()),
                    other => Err(shape_mismatch(&Self::KIND, &other)),
                }
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl MemberValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    #[inline]
    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(shape_mismatch(&Self::KIND, &other)),
        }
    }
}

impl MemberValue for f64 {
    const KIND: ValueKind = ValueKind::Double;

    #[inline]
    fn to_value(&self) -> ValueRef<'_> {
        ValueRef::Double(*self)
    }

    fn from_value(value: Value) -> Result<Self, NotationError> {
        match value {
            Value::Double(v) => Ok(v),
            other => Err(shape_mismatch(&Self::KIND, &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::info::ValueKind;
    use crate::member::MemberValue;
    use crate::value::Value;

    #[test]
    fn kinds_carry_ranges() {
        assert_eq!(i8::KIND, ValueKind::Int { min: -128, max: 127 });
        assert_eq!(u16::KIND, ValueKind::UInt { max: 65535 });
        assert_eq!(i64::KIND, ValueKind::Int { min: i64::MIN, max: i64::MAX });
    }

    #[test]
    fn narrowing_is_checked() {
        assert_eq!(u8::from_value(Value::UInt(255)), Ok(255));
        assert_eq!(u8::from_value(Value::UInt(256)).unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(i16::from_value(Value::Int(-40_000)).unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(
            i32::from_value(Value::UInt(1)).unwrap_err().kind(),
            ErrorKind::UnsupportedType
        );
    }
}
