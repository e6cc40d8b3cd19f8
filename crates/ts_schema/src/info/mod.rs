//! Descriptors: what the engines know about a described type.
//!
//! - [`TypeHandle`]: a `Copy` identity of a described type.
//! - [`TypeDescriptor`]: the cached, ordered member list of one type.
//! - [`MemberDescriptor`]: one member's wire name, kind and accessors.
//! - [`ValueKind`]: the closed set of member value shapes.
//! - [`EnumDescriptor`]: variant names and ordinals of a described enum.

// -----------------------------------------------------------------------------
// Modules

mod enum_info;
mod handle;
mod kind;
mod member_info;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use enum_info::EnumDescriptor;
pub use handle::TypeHandle;
pub use kind::{ObjectKind, ValueKind};
pub use member_info::{Getter, MemberDescriptor, Setter};
pub use type_info::TypeDescriptor;
