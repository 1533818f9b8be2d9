use alloc::string::String;
use core::fmt;

use crate::info::{FIELD_INFO, METHOD_INFO, TEXT};
use crate::info::{Primitive, PrimitiveType, TypePath};
use crate::ops::{Heap, MemberHandle, ObjectData, ObjectId};

// -----------------------------------------------------------------------------
// EnumValue

/// A value of a registered enum type.
///
/// The raw value is stored in the enum's underlying primitive kind and
/// need not match a declared variant.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct EnumValue {
    ty: TypePath,
    value: Primitive,
}

impl EnumValue {
    /// Creates an enum value without checking it against the registry.
    ///
    /// Prefer [`TypeCatalog::enum_value`], which resolves a variant name.
    ///
    /// [`TypeCatalog::enum_value`]: crate::catalog::TypeCatalog::enum_value
    #[inline]
    pub fn new(ty: impl Into<TypePath>, value: Primitive) -> Self {
        Self {
            ty: ty.into(),
            value,
        }
    }

    #[inline]
    pub fn ty(&self) -> &TypePath {
        &self.ty
    }

    #[inline]
    pub fn value(&self) -> Primitive {
        self.value
    }

    /// Returns the raw value widened to `i128`.
    #[inline]
    pub fn as_integer(&self) -> Option<i128> {
        self.value.as_integer()
    }
}

// -----------------------------------------------------------------------------
// Value

/// A slot of the object graph: a field, an element, a key or a root.
///
/// Primitives, text, enums, structs and member handles are stored inline
/// and have value semantics. Everything with identity lives in a [`Heap`]
/// and is referenced through [`Value::Ref`].
///
/// # Examples
///
/// ```
/// use cm_reflect::ops::Value;
///
/// let values = [Value::from("testString"), Value::from(1337), Value::from(true)];
/// assert_eq!(values[0].as_text(), Some("testString"));
/// assert_eq!(values[1].get::<i32>(), Some(1337));
/// assert_eq!(values[2].get::<bool>(), Some(true));
/// assert!(Value::Null.is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Hash)]
pub enum Value {
    #[default]
    Null,
    Primitive(Primitive),
    Text(String),
    Enum(EnumValue),
    Struct(ObjectData),
    Member(MemberHandle),
    Ref(ObjectId),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns the primitive if it is exactly of type `T`.
    #[inline]
    pub fn get<T: PrimitiveType>(&self) -> Option<T> {
        self.as_primitive().and_then(T::from_primitive)
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_struct(&self) -> Option<&ObjectData> {
        match self {
            Self::Struct(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn as_struct_mut(&mut self) -> Option<&mut ObjectData> {
        match self {
            Self::Struct(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn as_member(&self) -> Option<&MemberHandle> {
        match self {
            Self::Member(handle) => Some(handle),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::Ref(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the concrete runtime type of the value.
    ///
    /// `None` for null and for references missing from `heap`.
    pub fn type_path(&self, heap: &Heap) -> Option<TypePath> {
        Some(match self {
            Self::Null => return None,
            Self::Primitive(p) => TypePath::from(p.kind().name()),
            Self::Text(_) => TypePath::from(TEXT),
            Self::Enum(e) => e.ty.clone(),
            Self::Struct(data) => data.ty().clone(),
            Self::Member(MemberHandle::Method(_)) => TypePath::from(METHOD_INFO),
            Self::Member(MemberHandle::Field(_)) => TypePath::from(FIELD_INFO),
            Self::Ref(id) => heap.get(*id)?.ty().clone(),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Primitive(p) => fmt::Display::fmt(p, f),
            Self::Text(s) => fmt::Debug::fmt(s, f),
            Self::Enum(e) => write!(f, "{}({})", e.ty, e.value),
            Self::Struct(data) => write!(f, "{} {{ .. }}", data.ty()),
            Self::Member(handle) => fmt::Display::fmt(handle, f),
            Self::Ref(id) => write!(f, "ref {id:?}"),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Primitive(Primitive::from(value))
                }
            }
        )*
    };
}

impl_from_primitive!(bool, char, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl From<Primitive> for Value {
    #[inline]
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<EnumValue> for Value {
    #[inline]
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<ObjectData> for Value {
    #[inline]
    fn from(value: ObjectData) -> Self {
        Self::Struct(value)
    }
}

impl From<MemberHandle> for Value {
    #[inline]
    fn from(value: MemberHandle) -> Self {
        Self::Member(value)
    }
}

impl From<ObjectId> for Value {
    #[inline]
    fn from(value: ObjectId) -> Self {
        Self::Ref(value)
    }
}

impl From<Option<ObjectId>> for Value {
    #[inline]
    fn from(value: Option<ObjectId>) -> Self {
        value.map_or(Self::Null, Self::Ref)
    }
}
