use core::{error, fmt};

use crate::info::{EnumInfo, GenericInfo, InterfaceInfo, ObjectInfo, OpaqueInfo, TypePath};

// -----------------------------------------------------------------------------
// TypeKind

/// An enumeration of the registered descriptor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Object,
    Interface,
    Enum,
    Generic,
    Opaque,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => f.pad("Object"),
            Self::Interface => f.pad("Interface"),
            Self::Enum => f.pad("Enum"),
            Self::Generic => f.pad("Generic"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a `TypeInfo` value is not the expected `TypeKind`.
#[derive(Debug)]
pub struct TypeKindError {
    pub expected: TypeKind,
    pub received: TypeKind,
}

impl fmt::Display for TypeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for TypeKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// A registered type descriptor.
///
/// Primitive, text and reflection handle types are built into the
/// [`TypeCatalog`] and have no descriptor; array types and generic
/// instantiations are derived from their names.
///
/// [`TypeCatalog`]: crate::catalog::TypeCatalog
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Object(ObjectInfo),
    Interface(InterfaceInfo),
    Enum(EnumInfo),
    Generic(GenericInfo),
    Opaque(OpaqueInfo),
}

// Helper macro that implements type-safe accessor methods like `as_object`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to specific type information.
        pub const fn $name(&self) -> Result<&$info, TypeKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(TypeKindError {
                    expected: TypeKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_object: Object => ObjectInfo);
    impl_cast_method!(as_interface: Interface => InterfaceInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_generic: Generic => GenericInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the registered name.
    pub fn path(&self) -> &TypePath {
        match self {
            Self::Object(info) => info.path(),
            Self::Interface(info) => info.path(),
            Self::Enum(info) => info.path(),
            Self::Generic(info) => info.path(),
            Self::Opaque(info) => info.path(),
        }
    }

    /// Returns the [`TypeKind`] for this `TypeInfo` (a fast discriminator).
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Enum(_) => TypeKind::Enum,
            Self::Generic(_) => TypeKind::Generic,
            Self::Opaque(_) => TypeKind::Opaque,
        }
    }
}

macro_rules! impl_from_info {
    ($($info:ident => $kind:ident),* $(,)?) => {
        $(
            impl From<$info> for TypeInfo {
                #[inline]
                fn from(value: $info) -> Self {
                    Self::$kind(value)
                }
            }
        )*
    };
}

impl_from_info! {
    ObjectInfo => Object,
    InterfaceInfo => Interface,
    EnumInfo => Enum,
    GenericInfo => Generic,
    OpaqueInfo => Opaque,
}
