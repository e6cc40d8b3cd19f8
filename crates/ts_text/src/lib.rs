//! Text encoding and decoding for described types.
//!
//! - [`Encoder`]: writes an object graph as text.
//! - [`Decoder`]: the interpreted decoder, driven by cached descriptors.
//! - [`compiled`]: the runtime of decoders generated by `ts_codegen`.
//! - [`Reader`]: the character-level grammar both decoders share.
//!
//! The format is JSON-compatible with default options:
//!
//! ```text
//! object = "{" [ tag "," ] member ( "," member )* "}"
//! tag    = string ":" string
//! member = string ":" value
//! value  = number | string | array | object
//! array  = "[" [ count "," ] [ value ( "," value )* ] "]"
//! number = "-"? digit+ ( "." digit* )? ( ("e" | "E") ("+" | "-")? digit+ )?
//! ```
//!
//! Whitespace is allowed between tokens. Strings escape `"`, `\`, newline
//! and tab, and nothing else.
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod decoder;
mod encoder;
mod reader;

pub mod compiled;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::{Decoder, MAX_DEPTH, Session};
pub use encoder::Encoder;
pub use reader::Reader;
