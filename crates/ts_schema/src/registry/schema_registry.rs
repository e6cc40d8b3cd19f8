use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock};

use ts_utils::TypeIdMap;

use crate::info::{TypeDescriptor, TypeHandle};
use crate::object::Described;

/// A cache of [`TypeDescriptor`]s keyed by Rust type.
///
/// The registry is an ordinary value: create one, share it by reference or
/// behind an `Arc`, and hand it to encoders and decoders. It is safe to use
/// from many threads at once.
///
/// The first request for a type enumerates its members outside of any lock
/// and then publishes the result. If two threads race on the same type, both
/// may build a descriptor but the first one published is the one every
/// caller observes from then on.
///
/// # Example
///
/// ```
/// use ts_schema::{derive::Notation, SchemaRegistry};
/// use std::sync::Arc;
///
/// #[derive(Notation, Default)]
/// struct Sample {
///     id: u32,
///     tags: Vec<String>,
/// }
///
/// let registry = SchemaRegistry::new();
/// let first = registry.get::<Sample>();
/// let again = registry.get::<Sample>();
///
/// assert!(Arc::ptr_eq(&first, &again));
/// assert_eq!(first.members()[1].name(), "tags");
/// ```
#[derive(Default)]
pub struct SchemaRegistry {
    cache: RwLock<TypeIdMap<Arc<TypeDescriptor>>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            cache: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the descriptor of `T`, building it on first use.
    #[inline]
    pub fn get<T: Described>(&self) -> Arc<TypeDescriptor> {
        self.get_handle(TypeHandle::of::<T>())
    }

    /// Returns the descriptor of the type behind `handle`, building it on first use.
    pub fn get_handle(&self, handle: TypeHandle) -> Arc<TypeDescriptor> {
        let type_id = handle.type_id();

        // A poisoned lock still holds only complete descriptors.
        if let Some(descriptor) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return Arc::clone(descriptor);
        }

        let built = Arc::new(TypeDescriptor::new(handle));

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let published = cache.get_or_insert(type_id, || {
            log::trace!(
                "built descriptor for `{}` with {} members",
                built.type_path(),
                built.members().len(),
            );
            Arc::clone(&built)
        });
        Arc::clone(published)
    }

    /// Returns `true` if `T`'s descriptor has been built.
    pub fn contains<T: Described>(&self) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get_type::<T>()
            .is_some()
    }

    /// The number of cached descriptors.
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl core::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_set()
            .entries(cache.values().map(|descriptor| descriptor.type_path()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::SchemaRegistry;
    use crate::derive::Notation;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    #[derive(Notation, Default)]
    struct Leaf {
        value: f64,
    }

    #[derive(Notation, Default)]
    #[notation(class)]
    struct Branch {
        name: String,
        leaves: Vec<Leaf>,
        #[notation(skip)]
        _cache: u64,
    }

    #[test]
    fn descriptors_follow_declaration_order() {
        let registry = SchemaRegistry::new();
        let branch = registry.get::<Branch>();
        let names: Vec<_> = branch.members().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["name", "leaves"]);
        assert!(branch.is_class());
        assert_eq!(branch.type_name(), "Branch");
        assert_eq!(branch.index_of("leaves"), Some(1));
        assert!(branch.member("_cache").is_none());
        assert!(!registry.contains::<Leaf>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn concurrent_first_use_publishes_one_descriptor() {
        let registry = SchemaRegistry::new();
        let seen: Vec<_> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.get::<Branch>()))
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().unwrap())
                .collect()
        });
        let first = registry.get::<Branch>();
        assert!(seen.iter().all(|descriptor| Arc::ptr_eq(descriptor, &first)));
        assert_eq!(registry.len(), 1);
    }
}
