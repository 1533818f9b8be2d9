use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use cm_utils::hash::HashSet;

use crate::info::{FieldInfo, MemberKind, PrimitiveKind, TypeFlags, TypePath};

// -----------------------------------------------------------------------------
// TypeShape

/// The serialization-relevant classification of a type.
///
/// Computed once per type name by the [`TypeCatalog`] and shared through
/// an [`Arc`].
///
/// [`TypeCatalog`]: crate::catalog::TypeCatalog
#[derive(Debug)]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    Text,
    Enum {
        path: TypePath,
        underlying: PrimitiveKind,
    },
    Array(ElementType),
    Sequence(ElementType),
    Mapping(ElementType, ElementType),
    ReflectionHandle(MemberKind),
    Object(Arc<ObjectLayout>),
}

impl TypeShape {
    /// A short human readable name, used in error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Text => "text",
            Self::Enum { .. } => "enum",
            Self::Array(_) => "array",
            Self::Sequence(_) => "sequence",
            Self::Mapping(..) => "mapping",
            Self::ReflectionHandle(_) => "reflection handle",
            Self::Object(_) => "object",
        }
    }

    /// Whether values of this shape live in the heap and carry identity.
    ///
    /// Arrays, sequences, mappings and non-value object types do.
    pub fn is_reference(&self) -> bool {
        match self {
            Self::Array(_) | Self::Sequence(_) | Self::Mapping(..) => true,
            Self::Object(layout) => !layout.is_value_type(),
            _ => false,
        }
    }

    /// Whether a slot of this shape can never hold null.
    pub fn is_value_type(&self) -> bool {
        match self {
            Self::Primitive(_) | Self::Enum { .. } => true,
            Self::Object(layout) => layout.is_value_type(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "primitive({kind})"),
            Self::Text => f.pad("text"),
            Self::Enum { path, underlying } => write!(f, "enum({path}: {underlying})"),
            Self::Array(elem) => write!(f, "array({})", elem.path),
            Self::Sequence(elem) => write!(f, "sequence({})", elem.path),
            Self::Mapping(key, value) => write!(f, "mapping({}, {})", key.path, value.path),
            Self::ReflectionHandle(kind) => write!(f, "reflection handle({kind})"),
            Self::Object(layout) => write!(f, "object({}, {} fields)", layout.path, layout.len()),
        }
    }
}

// -----------------------------------------------------------------------------
// ElementType

/// The declared type of a container element, key or value, with its shape.
#[derive(Debug, Clone)]
pub struct ElementType {
    path: TypePath,
    shape: Arc<TypeShape>,
}

impl ElementType {
    #[inline]
    pub(crate) fn new(path: TypePath, shape: Arc<TypeShape>) -> Self {
        Self { path, shape }
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
    }

    #[inline]
    pub fn shape(&self) -> &Arc<TypeShape> {
        &self.shape
    }
}

// -----------------------------------------------------------------------------
// ObjectLayout

/// The flattened instance layout of an object type.
///
/// Fields of the whole inheritance chain are stored most-base-first, in
/// declaration order within each type. Static fields are excluded. The
/// order is recomputed identically on both ends of a stream, it is never
/// transmitted.
///
/// # Examples
///
/// ```
/// use cm_reflect::catalog::TypeCatalog;
/// use cm_reflect::info::ObjectInfo;
/// use cm_reflect::registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.register(ObjectInfo::new("Base").with_field("A", "i32"));
/// registry.register(
///     ObjectInfo::new("Derived")
///         .with_base("Base")
///         .with_field("B", "String")
///         .with_static_field("Count", "i32"),
/// );
/// let catalog = TypeCatalog::new(registry);
///
/// let layout = catalog.fields_of(&"Derived".into()).unwrap();
/// let names: Vec<_> = layout.fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["A", "B"]);
/// assert!(layout.is_subtype_of(&"Base".into()));
/// ```
#[derive(Debug)]
pub struct ObjectLayout {
    path: TypePath,
    flags: TypeFlags,
    fields: Box<[Arc<FieldInfo>]>,
    supertypes: HashSet<TypePath>,
}

impl ObjectLayout {
    pub(crate) fn new(
        path: TypePath,
        flags: TypeFlags,
        fields: Box<[Arc<FieldInfo>]>,
        supertypes: HashSet<TypePath>,
    ) -> Self {
        Self {
            path,
            flags,
            fields,
            supertypes,
        }
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
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

    /// Returns the instance fields, most-base-first.
    #[inline]
    pub fn fields(&self) -> &[Arc<FieldInfo>] {
        &self.fields
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the slot of the field named `name`.
    ///
    /// A field redeclared by a derived type hides the base one, so the
    /// most-derived declaration wins.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().rposition(|f| f.name() == name)
    }

    /// Whether a value of this type is assignable to a slot declared as `path`.
    ///
    /// True for the type itself, every base class, every interface
    /// implemented anywhere in the chain and `Object`.
    pub fn is_subtype_of(&self, path: &TypePath) -> bool {
        self.path == *path || self.supertypes.contains(path)
    }

    /// Returns every strict supertype, in no particular order.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypePath> {
        self.supertypes.iter()
    }
}
