//! The option sets fixtures are generated and tested with.

use std::sync::Arc;

use ts_schema::{FormatOptions, StructuralOptions, TextOptions, TypeScope};

use crate::{Marker, Record, Scene};

/// Every fixture type, plus [`EmptyObject`](ts_schema::EmptyObject).
pub fn scope() -> Arc<TypeScope> {
    let mut scope = TypeScope::new();
    scope.register::<Scene>();
    scope.register::<Marker>();
    scope.register::<Record>();
    Arc::new(scope)
}

/// Default options: tab-indented lines, no type tags.
pub fn untagged() -> FormatOptions {
    FormatOptions::default()
}

/// Default layout with type tags.
pub fn tagged() -> FormatOptions {
    FormatOptions::default().with_structural(StructuralOptions::new().with_type_tags(true).with_scope(scope()))
}

/// Compact text with every text option away from its default.
pub fn named() -> FormatOptions {
    FormatOptions::new(
        StructuralOptions::new().with_type_tags(true).with_scope(scope()),
        TextOptions::compact()
            .with_class_tag("$type")
            .with_enum_as_string(true)
            .with_array_length_prefix(true),
    )
}

/// Each option set with the name of the module generated for it.
pub fn all() -> [(&'static str, FormatOptions); 3] {
    [("untagged", untagged()), ("tagged", tagged()), ("named", named())]
}
