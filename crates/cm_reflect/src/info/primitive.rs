use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// PrimitiveKind

/// The fixed-width scalar kinds understood by the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Every kind, in wire order.
    pub const ALL: [PrimitiveKind; 12] = [
        Self::Bool,
        Self::Char,
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    /// Returns the registered type name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Looks a kind up by its type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether this kind can back an enum.
    #[inline]
    pub const fn is_integer(self) -> bool {
        !matches!(self, Self::Bool | Self::Char | Self::F32 | Self::F64)
    }

    /// The zero value of this kind.
    pub const fn default_value(self) -> Primitive {
        match self {
            Self::Bool => Primitive::Bool(false),
            Self::Char => Primitive::Char('\0'),
            Self::I8 => Primitive::I8(0),
            Self::U8 => Primitive::U8(0),
            Self::I16 => Primitive::I16(0),
            Self::U16 => Primitive::U16(0),
            Self::I32 => Primitive::I32(0),
            Self::U32 => Primitive::U32(0),
            Self::I64 => Primitive::I64(0),
            Self::U64 => Primitive::U64(0),
            Self::F32 => Primitive::F32(0.0),
            Self::F64 => Primitive::F64(0.0),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// Primitive

/// A scalar value tagged with its [`PrimitiveKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Primitive {
    /// Returns the kind of this value.
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::Char(_) => PrimitiveKind::Char,
            Self::I8(_) => PrimitiveKind::I8,
            Self::U8(_) => PrimitiveKind::U8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::U16(_) => PrimitiveKind::U16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::U32(_) => PrimitiveKind::U32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::U64(_) => PrimitiveKind::U64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
        }
    }

    /// Widens an integer value to `i128`, `None` for non-integer kinds.
    pub const fn as_integer(&self) -> Option<i128> {
        Some(match *self {
            Self::I8(v) => v as i128,
            Self::U8(v) => v as i128,
            Self::I16(v) => v as i128,
            Self::U16(v) => v as i128,
            Self::I32(v) => v as i128,
            Self::U32(v) => v as i128,
            Self::I64(v) => v as i128,
            Self::U64(v) => v as i128,
            _ => return None,
        })
    }

    /// Narrows `value` into an integer of `kind`.
    ///
    /// Returns `None` for non-integer kinds or when the value is out of range.
    pub fn from_integer(kind: PrimitiveKind, value: i128) -> Option<Self> {
        Some(match kind {
            PrimitiveKind::I8 => Self::I8(value.try_into().ok()?),
            PrimitiveKind::U8 => Self::U8(value.try_into().ok()?),
            PrimitiveKind::I16 => Self::I16(value.try_into().ok()?),
            PrimitiveKind::U16 => Self::U16(value.try_into().ok()?),
            PrimitiveKind::I32 => Self::I32(value.try_into().ok()?),
            PrimitiveKind::U32 => Self::U32(value.try_into().ok()?),
            PrimitiveKind::I64 => Self::I64(value.try_into().ok()?),
            PrimitiveKind::U64 => Self::U64(value.try_into().ok()?),
            _ => return None,
        })
    }
}

/// Floats hash by their bits, with `-0.0` folded into `0.0` to agree
/// with `PartialEq`.
impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match *self {
            Self::Bool(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::I8(v) => v.hash(state),
            Self::U8(v) => v.hash(state),
            Self::I16(v) => v.hash(state),
            Self::U16(v) => v.hash(state),
            Self::I32(v) => v.hash(state),
            Self::U32(v) => v.hash(state),
            Self::I64(v) => v.hash(state),
            Self::U64(v) => v.hash(state),
            Self::F32(v) => (v + 0.0).to_bits().hash(state),
            Self::F64(v) => (v + 0.0).to_bits().hash(state),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => fmt::Debug::fmt(v, f),
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
        }
    }
}

// -----------------------------------------------------------------------------
// PrimitiveType

/// Rust scalar types that map one-to-one onto a [`PrimitiveKind`].
///
/// # Examples
///
/// ```
/// use cm_reflect::info::{Primitive, PrimitiveKind, PrimitiveType};
///
/// assert_eq!(<u16 as PrimitiveType>::KIND, PrimitiveKind::U16);
/// assert_eq!(i32::from_primitive(Primitive::I32(1337)), Some(1337));
/// assert_eq!(i32::from_primitive(Primitive::I64(1337)), None);
/// ```
pub trait PrimitiveType: Copy + Sized {
    const KIND: PrimitiveKind;

    fn into_primitive(self) -> Primitive;

    fn from_primitive(primitive: Primitive) -> Option<Self>;
}

macro_rules! impl_primitive_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PrimitiveType for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::$variant;

                #[inline]
                fn into_primitive(self) -> Primitive {
                    Primitive::$variant(self)
                }

                #[inline]
                fn from_primitive(primitive: Primitive) -> Option<Self> {
                    match primitive {
                        Primitive::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Primitive {
                #[inline]
                fn from(value: $ty) -> Self {
                    Primitive::$variant(value)
                }
            }
        )*
    };
}

impl_primitive_type! {
    bool => Bool,
    char => Char,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

// -----------------------------------------------------------------------------
// Tests
