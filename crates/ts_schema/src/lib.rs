//! Type descriptions for the tessel notation.
//!
//! A described type is one the engines can walk member by member. Describe
//! a struct or a field-less enum with [`#[derive(Notation)]`](derive::Notation),
//! then let a [`SchemaRegistry`] cache its [`TypeDescriptor`](info::TypeDescriptor).
//!
//! ```
//! use ts_schema::{derive::Notation, SchemaRegistry};
//!
//! #[derive(Notation, Default, Clone, Copy, PartialEq, Debug)]
//! enum Fill {
//!     #[default]
//!     Solid,
//!     Hatched = 4,
//! }
//!
//! #[derive(Notation, Default)]
//! #[notation(class)]
//! struct Panel {
//!     title: String,
//!     #[notation(rename = "w")]
//!     width: u16,
//!     fill: Fill,
//!     note: Option<String>,
//! }
//!
//! let registry = SchemaRegistry::new();
//! let panel = registry.get::<Panel>();
//! let names: Vec<_> = panel.members().iter().map(|m| m.name()).collect();
//! assert_eq!(names, ["title", "w", "fill", "note"]);
//! assert!(panel.members()[3].is_optional());
//! ```
//!
//! Modules:
//!
//! - [`info`]: descriptors and value kinds.
//! - [`member`]: which Rust types may be members.
//! - [`registry`]: the descriptor cache and the type scope.
//! - [`options`]: format options.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive names this crate `ts_schema`, including inside the crate's own tests.
extern crate self as ts_schema;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod object;
mod value;

pub mod info;
pub mod member;
pub mod options;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::{ErrorKind, FormatReason, NotationError, SchemaReason};
pub use info::{ObjectKind, TypeDescriptor, TypeHandle, ValueKind};
pub use member::{EnumMember, Member, MemberValue};
pub use object::{Described, EmptyObject, Object};
pub use options::{FormatOptions, StructuralOptions, TextOptions};
pub use registry::{SchemaRegistry, TypeScope};
pub use value::{Value, ValueRef};

pub use ts_schema_derive as derive;
