use core::any::TypeId;
use core::fmt;

use ts_utils::TypeIdMap;
use ts_utils::hash::{HashMap, HashSet};

use crate::info::TypeHandle;
use crate::object::{Described, EmptyObject};

/// The set of types a class tag may name.
///
/// Types are indexed by their full type path and by their short name (the
/// last path segment). A short name shared by two registered types is
/// ambiguous and no longer resolves; the full path always does.
///
/// # Example
///
/// ```
/// use ts_schema::{derive::Notation, TypeScope};
///
/// mod shapes {
///     use ts_schema::derive::Notation;
///
///     #[derive(Notation, Default)]
///     #[notation(class)]
///     pub struct Circle {
///         pub radius: f32,
///     }
/// }
///
/// let mut scope = TypeScope::new();
/// scope.register::<shapes::Circle>();
///
/// let by_path = scope.resolve(ts_schema::TypeHandle::of::<shapes::Circle>().type_path());
/// assert!(by_path.is_some());
/// assert_eq!(scope.resolve("Circle"), by_path);
/// ```
pub struct TypeScope {
    handles: TypeIdMap<TypeHandle>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    auto_registered: bool,
}

impl Default for TypeScope {
    /// See [`TypeScope::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScope {
    /// Creates a scope that knows no types.
    pub fn empty() -> Self {
        Self {
            handles: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
            auto_registered: false,
        }
    }

    /// Creates a scope that knows [`EmptyObject`], the default value of
    /// polymorphic members.
    pub fn new() -> Self {
        let mut scope = Self::empty();
        scope.register::<EmptyObject>();
        scope
    }

    fn add_indices(&mut self, handle: TypeHandle) {
        let type_id = handle.type_id();
        let type_name = handle.type_name();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.remove(type_name).is_some() {
                log::warn!(
                    "short type name `{type_name}` is now ambiguous, tags must use the full path `{}`",
                    handle.type_path(),
                );
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, type_id);
            }
        }

        self.type_path_to_id.insert(handle.type_path(), type_id);
    }

    /// Registers the type behind `handle` unless already present.
    ///
    /// Returns `true` if it was added. Dependencies are not registered.
    pub fn insert(&mut self, handle: TypeHandle) -> bool {
        if self.handles.try_insert(handle.type_id(), || handle) {
            self.add_indices(handle);
            log::trace!("registered `{}` in type scope", handle.type_path());
            true
        } else {
            false
        }
    }

    /// Registers `T` and, on first registration, every type its members refer to.
    pub fn register<T: Described>(&mut self) {
        self.register_handle(TypeHandle::of::<T>());
    }

    /// Like [`register`](Self::register), for a handle.
    pub fn register_handle(&mut self, handle: TypeHandle) {
        if self.insert(handle) {
            handle.register_members(self);
        }
    }

    /// Registers every type annotated with `#[notation(auto_register)]`.
    ///
    /// Returns `true` if the platform supports collecting them (see the
    /// `inventory` crate). Always `false` without the `auto_register` feature.
    /// Repeated calls do not duplicate anything.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if !self.auto_registered {
                crate::__macro_exports::auto_register::register_types(self);
            }
            self.auto_registered
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[cfg(feature = "auto_register")]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Finds a type by full path, then by unambiguous short name.
    pub fn resolve(&self, name: &str) -> Option<TypeHandle> {
        let type_id = match self.type_path_to_id.get(name) {
            Some(id) => id,
            None => self.type_name_to_id.get(name)?,
        };
        self.handles.get(type_id).copied()
    }

    /// Returns `true` if `T` is registered.
    pub fn contains<T: Described>(&self) -> bool {
        self.handles.contains(&TypeId::of::<T>())
    }

    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Iterates over the registered handles in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeHandle> {
        self.handles.values()
    }
}

impl fmt::Debug for TypeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.handles.values().map(TypeHandle::type_path))
            .finish()
    }
}
