//! Where descriptors and type names live.
//!
//! - [`SchemaRegistry`]: the thread-safe descriptor cache shared by every engine.
//! - [`TypeScope`]: the set of types a class tag may name.

// -----------------------------------------------------------------------------
// Modules

mod schema_registry;
mod type_scope;

// -----------------------------------------------------------------------------
// Exports

pub use schema_registry::SchemaRegistry;
pub use type_scope::TypeScope;
