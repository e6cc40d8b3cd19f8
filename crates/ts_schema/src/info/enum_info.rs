use alloc::string::{String, ToString};

use crate::error::{NotationError, SchemaReason};

/// Variant names and ordinals of a described enum.
///
/// Built in a `const` by `#[derive(Notation)]`:
///
/// ```
/// use ts_schema::info::EnumDescriptor;
///
/// const COLOR: EnumDescriptor =
///     EnumDescriptor::new("demo::Color", &[("Red", 0), ("Green", 1), ("Blue", 7)]);
///
/// assert_eq!(COLOR.ordinal_of("Blue"), Some(7));
/// assert_eq!(COLOR.name_of(1), Some("Green"));
/// assert_eq!(COLOR.name_of(2), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    type_path: &'static str,
    variants: &'static [(&'static str, i64)],
}

impl EnumDescriptor {
    #[inline]
    pub const fn new(type_path: &'static str, variants: &'static [(&'static str, i64)]) -> Self {
        Self {
            type_path,
            variants,
        }
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// `(name, ordinal)` pairs in declaration order.
    #[inline]
    pub const fn variants(&self) -> &'static [(&'static str, i64)] {
        self.variants
    }

    pub fn ordinal_of(&self, name: &str) -> Option<i64> {
        self.variants
            .iter()
            .find_map(|&(variant, ordinal)| (variant == name).then_some(ordinal))
    }

    pub fn name_of(&self, ordinal: i64) -> Option<&'static str> {
        self.variants
            .iter()
            .find_map(|&(variant, value)| (value == ordinal).then_some(variant))
    }

    /// Like [`ordinal_of`](Self::ordinal_of), but an unknown name is a schema error.
    pub fn resolve_name(&self, name: String) -> Result<i64, NotationError> {
        match self.ordinal_of(&name) {
            Some(ordinal) => Ok(ordinal),
            None => Err(NotationError::schema(SchemaReason::UnknownVariant {
                enum_path: self.type_path,
                variant: name,
            })),
        }
    }

    /// Checks that `ordinal` names a variant.
    pub fn resolve_ordinal(&self, ordinal: i64) -> Result<i64, NotationError> {
        match self.name_of(ordinal) {
            Some(_) => Ok(ordinal),
            None => Err(NotationError::schema(SchemaReason::UnknownVariant {
                enum_path: self.type_path,
                variant: ordinal.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EnumDescriptor;
    use crate::error::ErrorKind;
    use alloc::string::String;

    const MODE: EnumDescriptor = EnumDescriptor::new("demo::Mode", &[("Off", -1), ("On", 1)]);

    #[test]
    fn unknown_variants_are_schema_errors() {
        assert_eq!(MODE.resolve_name(String::from("On")), Ok(1));
        assert_eq!(MODE.resolve_ordinal(-1), Ok(-1));

        let err = MODE.resolve_name(String::from("Dim")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        let err = MODE.resolve_ordinal(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }
}
