#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

pub use ts_codegen as codegen;
pub use ts_schema as schema;
pub use ts_text as text;
pub use ts_utils as utils;

// -----------------------------------------------------------------------------
// Prelude

/// The types most callers need to encode and decode a described value.
pub mod prelude {
    pub use ts_schema::derive::Notation;
    pub use ts_schema::{Described, NotationError, Object, SchemaRegistry, TypeScope};
    pub use ts_schema::{FormatOptions, StructuralOptions, TextOptions};
    pub use ts_text::{Decoder, Encoder};
}
