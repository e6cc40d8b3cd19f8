//! What a struct field may be.
//!
//! - [`MemberValue`]: a type with a [`ValueKind`] and conversions to and from
//!   dynamic values. Implemented for integers, floats, `String`, `Vec<T>`,
//!   `Box<[T]>`, `[T; N]`, boxed described types, `Box<dyn Object>`, and by
//!   `#[derive(Notation)]`.
//! - [`Member`]: a `MemberValue` (required) or an `Option` of one (optional).
//! - [`EnumMember`]: the extra surface of a described enum.

// -----------------------------------------------------------------------------
// Modules

mod impls;

// -----------------------------------------------------------------------------
// Traits

use alloc::format;

use crate::error::NotationError;
use crate::info::{EnumDescriptor, ValueKind};
use crate::registry::TypeScope;
use crate::value::{Value, ValueRef};

/// A value that can sit in a member.
pub trait MemberValue: Sized + Send + Sync + 'static {
    const KIND: ValueKind;

    fn to_value(&self) -> ValueRef<'_>;

    /// Converts a decoded value. Fails when the value does not have the
    /// shape of [`KIND`](Self::KIND) or does not fit the Rust type.
    fn from_value(value: Value) -> Result<Self, NotationError>;

    /// Registers described types this value refers to.
    fn register_dependencies(_scope: &mut TypeScope) {}
}

/// A struct field that carries a member.
pub trait Member: Sized + 'static {
    const KIND: ValueKind;
    const OPTIONAL: bool;

    /// `None` when the member is absent.
    fn get(&self) -> Option<ValueRef<'_>>;

    fn set(&mut self, value: Value) -> Result<(), NotationError>;

    fn register_dependencies(scope: &mut TypeScope);
}

impl<T: MemberValue> Member for T {
    const KIND: ValueKind = <T as MemberValue>::KIND;
    const OPTIONAL: bool = false;

    #[inline]
    fn get(&self) -> Option<ValueRef<'_>> {
        Some(self.to_value())
    }

    #[inline]
    fn set(&mut self, value: Value) -> Result<(), NotationError> {
        *self = T::from_value(value)?;
        Ok(())
    }

    #[inline]
    fn register_dependencies(scope: &mut TypeScope) {
        <T as MemberValue>::register_dependencies(scope);
    }
}

impl<T: MemberValue> Member for Option<T> {
    const KIND: ValueKind = <T as MemberValue>::KIND;
    const OPTIONAL: bool = true;

    #[inline]
    fn get(&self) -> Option<ValueRef<'_>> {
        self.as_ref().map(T::to_value)
    }

    #[inline]
    fn set(&mut self, value: Value) -> Result<(), NotationError> {
        *self = Some(T::from_value(value)?);
        Ok(())
    }

    #[inline]
    fn register_dependencies(scope: &mut TypeScope) {
        <T as MemberValue>::register_dependencies(scope);
    }
}

/// A described enum.
pub trait EnumMember: MemberValue {
    const DESCRIPTOR: &'static EnumDescriptor;

    fn from_ordinal(ordinal: i64) -> Option<Self>;

    fn ordinal(&self) -> i64;
}

/// The error for a value whose shape does not match the member's kind.
pub(crate) fn shape_mismatch(kind: &ValueKind, value: &Value) -> NotationError {
    NotationError::unsupported(format!(
        "a {kind} member cannot hold a {} value",
        value.describe()
    ))
}
