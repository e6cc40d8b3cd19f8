//! Described types shared by the tests of the tessel crates and by the
//! decoders `ts_fixtures_compiled` generates at build time.
//!
//! [`scene`] is a small document: widgets laid out in a scene, with markers
//! and other widgets as polymorphic children. [`Record`] is the minimal
//! struct with a required and an optional member.

// -----------------------------------------------------------------------------
// Modules

pub mod options;
pub mod record;
pub mod scene;

// -----------------------------------------------------------------------------
// Exports

pub use record::Record;
pub use scene::{Anchor, Marker, Scene, Transform, Widget, plain_scene, sample_scene};

use ts_schema::TypeHandle;

/// The types decoders are generated for. Types nested by value are
/// generated along with them.
pub fn roots() -> [TypeHandle; 3] {
    [
        TypeHandle::of::<Scene>(),
        TypeHandle::of::<Marker>(),
        TypeHandle::of::<Record>(),
    ]
}
