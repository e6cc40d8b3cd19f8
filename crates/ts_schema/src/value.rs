use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::object::Object;

// -----------------------------------------------------------------------------
// Value

/// An owned member value, produced by the decoder and consumed by a
/// member's setter.
#[derive(Debug, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    String(String),
    /// An enum ordinal.
    Enum(i64),
    List(Vec<Value>),
    Object(Box<dyn Object>),
}

impl Value {
    /// A short name of the variant, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}

// -----------------------------------------------------------------------------
// ValueRef

/// A borrowed member value, produced by a member's getter and consumed by
/// the encoder.
#[derive(Debug, PartialEq)]
pub enum ValueRef<'a> {
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    Str(&'a str),
    /// An enum ordinal.
    Enum(i64),
    List(Vec<ValueRef<'a>>),
    Object(&'a (dyn Object + 'static)),
}

impl ValueRef<'_> {
    /// A short name of the variant, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}
