use alloc::sync::Arc;

use cm_utils::hash::HashMap;

use crate::info::{GenericInfo, ObjectInfo, OpaqueInfo, TypeInfo, TypePath};
use crate::info::{FIELD_INFO, METHOD_INFO, OBJECT, TEXT};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of serializable types, keyed by their canonical name.
///
/// This struct is the central store of type descriptors. Rust cannot
/// enumerate the fields of an arbitrary type at runtime, so every type
/// that may appear in a serialized graph is [registered] here up front.
///
/// Primitive kinds, `String`, `MethodInfo` and `FieldInfo` are built into
/// the [`TypeCatalog`] and need no descriptor. Array types and generic
/// instantiations such as `List<Foo>` are derived from their names.
///
/// Once filled, the registry is frozen into a [`TypeCatalog`].
///
/// # Example
///
/// ```
/// use cm_reflect::info::{EnumInfo, ObjectInfo};
/// use cm_reflect::registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
///
/// assert!(registry.register(EnumInfo::new("Color").with_variant("Red", 0)));
/// assert!(registry.register(ObjectInfo::new("Brush").with_field("Color", "Color")));
///
/// // Names are unique, the second registration is ignored.
/// assert!(!registry.register(ObjectInfo::new("Brush")));
///
/// assert!(registry.contains("Brush"));
/// assert!(registry.get("Color").unwrap().as_enum().is_ok());
/// ```
///
/// [registered]: TypeRegistry::register
/// [`TypeCatalog`]: crate::catalog::TypeCatalog
pub struct TypeRegistry {
    types: HashMap<TypePath, Arc<TypeInfo>>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    ///
    /// Not even `Object` is registered, see [`TypeRegistry::new`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            types: HashMap::default(),
        }
    }

    /// Create a type registry with the built-in descriptors.
    ///
    /// - `Object`: the abstract root of every object type.
    /// - `Vec` `List` `VecDeque`: sequence definitions.
    /// - `Map` `Dictionary`: mapping definitions.
    /// - `Delegate` `IntPtr`: known but unserializable types.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtins();
        registry
    }

    pub(crate) fn register_builtins(&mut self) {
        self.register(ObjectInfo::new(OBJECT).with_abstract());
        self.register(GenericInfo::sequence("Vec"));
        self.register(GenericInfo::sequence("List"));
        self.register(GenericInfo::sequence("VecDeque"));
        self.register(GenericInfo::mapping("Map"));
        self.register(GenericInfo::mapping("Dictionary"));
        self.register(OpaqueInfo::new("Delegate"));
        self.register(OpaqueInfo::new("IntPtr"));
    }

    /// Try add or do nothing.
    ///
    /// - If the name has already been registered, the function will do nothing and return `false`.
    /// - If the name does not exist, the function will insert the descriptor and return `true`.
    ///
    /// Names of built-in shapes (`i32`, `String`, `MethodInfo`, ...) are
    /// never looked up here, registering them has no effect on
    /// classification.
    pub fn register(&mut self, info: impl Into<TypeInfo>) -> bool {
        let info: TypeInfo = info.into();
        let path = info.path().clone();
        if self.types.contains_key(&path) {
            return false;
        }
        if is_builtin_name(path.as_str()) {
            log::warn!("`{path}` shadows a built-in type and will be ignored by the catalog");
        }
        self.types.insert(path, Arc::new(info));
        true
    }

    /// Insert or **Overwrite** a descriptor.
    ///
    /// Returns the previous descriptor registered under the same name.
    pub fn insert(&mut self, info: impl Into<TypeInfo>) -> Option<Arc<TypeInfo>> {
        let info: TypeInfo = info.into();
        self.types.insert(info.path().clone(), Arc::new(info))
    }

    /// Automatically registers every type submitted with [`auto_register!`].
    ///
    /// Repeated calls are cheap and will not insert duplicates, because
    /// [`register`](Self::register) ignores names that already exist.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration succeeded on the current platform; otherwise, `false`.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled, it always do nothing and
    /// returns `false`.
    ///
    /// [`auto_register!`]: crate::auto_register
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            // This crate submits its own builtins, so zero means the
            // platform does not support static registration.
            let count = super::auto_register::register_all(self);
            log::debug!("auto registration ran {count} registration function(s)");
            count > 0
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Whether a type with the given name has been registered.
    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.types.contains_key(path)
    }

    /// Returns the descriptor registered under `path`.
    #[inline]
    pub fn get(&self, path: &str) -> Option<&Arc<TypeInfo>> {
        self.types.get(path)
    }

    /// Returns an iterator over the registered descriptors.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Arc<TypeInfo>> {
        self.types.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }
}

/// Names whose shape is fixed by the catalog.
pub(crate) fn is_builtin_name(path: &str) -> bool {
    crate::info::PrimitiveKind::from_name(path).is_some()
        || path == TEXT
        || path == METHOD_INFO
        || path == FIELD_INFO
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.types.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
