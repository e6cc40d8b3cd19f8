use alloc::string::String;
use core::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use ts_schema::NotationError;

/// Why a decoder could not be generated.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The descriptor cannot be compiled with the generator's options, or
    /// names something that has no spelling in Rust source.
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("`{first}` and `{second}` would both generate a decoder named `{name}`")]
    DuplicateDecoder {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("failed to write `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("formatting generated source failed")]
    Fmt(#[from] fmt::Error),
}
