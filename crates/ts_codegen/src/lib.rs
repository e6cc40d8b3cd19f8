//! Source generation for compiled decoders.
//!
//! [`DecoderGenerator`] turns cached type descriptors into Rust source that
//! implements `ts_text::compiled::CompiledDecoder`. It runs ahead of time,
//! usually from a build script:
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use ts_codegen::DecoderGenerator;
//! use ts_schema::{derive::Notation, FormatOptions, SchemaRegistry, TypeHandle};
//!
//! #[derive(Notation, Default)]
//! struct Record {
//!     id: i32,
//!     name: String,
//!     tag: Option<String>,
//! }
//!
//! let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap());
//! let registry = SchemaRegistry::new();
//! DecoderGenerator::new(FormatOptions::default())
//!     .write_module(out_dir.join("decoders.rs"), &registry, &[TypeHandle::of::<Record>()])
//!     .unwrap();
//! ```
//!
//! The crate then pulls the module in with
//! `include!(concat!(env!("OUT_DIR"), "/decoders.rs"))` and decodes through
//! `Decoder::decode_compiled::<RecordDecoder>`.
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod generator;
mod source;

// -----------------------------------------------------------------------------
// Exports

pub use error::GenerateError;
pub use generator::DecoderGenerator;
