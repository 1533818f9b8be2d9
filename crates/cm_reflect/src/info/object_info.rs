use alloc::sync::Arc;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::info::{FieldInfo, MethodInfo, TypePath};

// -----------------------------------------------------------------------------
// TypeFlags

bitflags! {
    /// Flags describing how an object type may be used.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u8 {
        /// The type can only be used as a declared type, never instantiated.
        const ABSTRACT = 1;
        /// The type has value semantics: copied inline, never identity-tracked.
        const VALUE_TYPE = 1 << 1;
    }
}

// -----------------------------------------------------------------------------
// ObjectInfo

/// Descriptor of a class-like type: an optional base, implemented
/// interfaces, declared fields and declared methods.
///
/// Only members declared by this type are stored here. The inherited,
/// flattened layout is computed by the [`TypeCatalog`].
///
/// # Examples
///
/// ```
/// use cm_reflect::info::ObjectInfo;
///
/// let base = ObjectInfo::new("BaseClass")
///     .with_abstract()
///     .with_interface("Interface")
///     .with_field("BooleanProperty", "bool")
///     .with_method("PureVirtualMethod");
///
/// let derived = ObjectInfo::new("Derived")
///     .with_base("BaseClass")
///     .with_field("StringProperty", "String");
///
/// assert!(base.is_abstract());
/// assert_eq!(derived.base().map(|b| b.as_str()), Some("BaseClass"));
/// assert_eq!(derived.fields().len(), 1);
/// ```
///
/// [`TypeCatalog`]: crate::catalog::TypeCatalog
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    path: TypePath,
    base: Option<TypePath>,
    interfaces: Vec<TypePath>,
    flags: TypeFlags,
    fields: Vec<Arc<FieldInfo>>,
    methods: Vec<Arc<MethodInfo>>,
}

impl ObjectInfo {
    /// Creates a reference type descriptor without members.
    pub fn new(path: impl Into<TypePath>) -> Self {
        Self {
            path: path.into(),
            base: None,
            interfaces: Vec::new(),
            flags: TypeFlags::empty(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Creates a value type descriptor (a struct), copied inline on the wire.
    pub fn value_type(path: impl Into<TypePath>) -> Self {
        let mut info = Self::new(path);
        info.flags |= TypeFlags::VALUE_TYPE;
        info
    }

    pub fn with_base(mut self, base: impl Into<TypePath>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<TypePath>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_abstract(mut self) -> Self {
        self.flags |= TypeFlags::ABSTRACT;
        self
    }

    /// Declares an instance field. Declaration order is layout order.
    pub fn with_field(mut self, name: &str, ty: impl Into<TypePath>) -> Self {
        let field = FieldInfo::new(name, ty.into(), self.path.clone(), false);
        self.fields.push(Arc::new(field));
        self
    }

    /// Declares a static field, visible to lookups but not serialized.
    pub fn with_static_field(mut self, name: &str, ty: impl Into<TypePath>) -> Self {
        let field = FieldInfo::new(name, ty.into(), self.path.clone(), true);
        self.fields.push(Arc::new(field));
        self
    }

    pub fn with_method(mut self, name: &str) -> Self {
        let method = MethodInfo::new(name, self.path.clone(), false);
        self.methods.push(Arc::new(method));
        self
    }

    pub fn with_static_method(mut self, name: &str) -> Self {
        let method = MethodInfo::new(name, self.path.clone(), true);
        self.methods.push(Arc::new(method));
        self
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
    }

    #[inline]
    pub fn base(&self) -> Option<&TypePath> {
        self.base.as_ref()
    }

    #[inline]
    pub fn interfaces(&self) -> &[TypePath] {
        &self.interfaces
    }

    #[inline]
    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT)
    }

    #[inline]
    pub fn is_value_type(&self) -> bool {
        self.flags.contains(TypeFlags::VALUE_TYPE)
    }

    /// Returns the declared fields, statics included, in declaration order.
    #[inline]
    pub fn fields(&self) -> &[Arc<FieldInfo>] {
        &self.fields
    }

    /// Returns the declared methods in declaration order.
    #[inline]
    pub fn methods(&self) -> &[Arc<MethodInfo>] {
        &self.methods
    }

    /// Returns the declared field named `name`, if present.
    pub fn field(&self, name: &str) -> Option<&Arc<FieldInfo>> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns the declared method named `name`, if present.
    pub fn method(&self, name: &str) -> Option<&Arc<MethodInfo>> {
        self.methods.iter().find(|m| m.name() == name)
    }
}

// -----------------------------------------------------------------------------
// InterfaceInfo

/// Descriptor of an interface: a declared-only type that objects implement.
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    path: TypePath,
    extends: Vec<TypePath>,
    methods: Vec<Arc<MethodInfo>>,
}

impl InterfaceInfo {
    pub fn new(path: impl Into<TypePath>) -> Self {
        Self {
            path: path.into(),
            extends: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_extends(mut self, interface: impl Into<TypePath>) -> Self {
        self.extends.push(interface.into());
        self
    }

    pub fn with_method(mut self, name: &str) -> Self {
        let method = MethodInfo::new(name, self.path.clone(), false);
        self.methods.push(Arc::new(method));
        self
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
    }

    /// Returns the interfaces this one extends.
    #[inline]
    pub fn extends(&self) -> &[TypePath] {
        &self.extends
    }

    #[inline]
    pub fn methods(&self) -> &[Arc<MethodInfo>] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&Arc<MethodInfo>> {
        self.methods.iter().find(|m| m.name() == name)
    }
}
