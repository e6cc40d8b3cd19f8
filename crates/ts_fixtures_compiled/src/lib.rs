//! Compiled decoders for the `ts_fixtures` types.
//!
//! The build script runs `ts_codegen` once per option set in
//! `ts_fixtures::options`. Each module holds a decoder for every fixture
//! root and the types they nest by value, and only matches decoders whose
//! options are the module's:
//!
//! ```
//! use ts_fixtures::{Record, options};
//! use ts_fixtures_compiled::untagged::RecordDecoder;
//! use ts_schema::SchemaRegistry;
//! use ts_text::Decoder;
//!
//! let registry = SchemaRegistry::new();
//! let options = options::untagged();
//! let record = Decoder::new(&registry, &options)
//!     .decode_compiled::<RecordDecoder>(r#"{"id":5,"name":"abc"}"#)
//!     .unwrap();
//! assert_eq!(record, Record { id: 5, name: "abc".into(), tag: None });
//! ```

// -----------------------------------------------------------------------------
// Modules

/// Decoders for [`ts_fixtures::options::untagged`].
pub mod untagged {
    include!(concat!(env!("OUT_DIR"), "/untagged.rs"));
}

/// Decoders for [`ts_fixtures::options::tagged`].
pub mod tagged {
    include!(concat!(env!("OUT_DIR"), "/tagged.rs"));
}

/// Decoders for [`ts_fixtures::options::named`].
pub mod named {
    include!(concat!(env!("OUT_DIR"), "/named.rs"));
}
