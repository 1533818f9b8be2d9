use core::fmt;

use cm_reflect::info::PrimitiveKind;

use crate::MalformedStream;

/// The one-byte shape tag that starts every encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Null = 0,
    BackRef = 1,
    Bool = 2,
    Char = 3,
    I8 = 4,
    U8 = 5,
    I16 = 6,
    U16 = 7,
    I32 = 8,
    U32 = 9,
    I64 = 10,
    U64 = 11,
    F32 = 12,
    F64 = 13,
    Text = 14,
    Enum = 15,
    Array = 16,
    Sequence = 17,
    Mapping = 18,
    ReflectionHandle = 19,
    Object = 20,
    Struct = 21,
}

impl Tag {
    const ALL: [Tag; 22] = [
        Self::Null,
        Self::BackRef,
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
        Self::Text,
        Self::Enum,
        Self::Array,
        Self::Sequence,
        Self::Mapping,
        Self::ReflectionHandle,
        Self::Object,
        Self::Struct,
    ];

    /// Returns the tag of a primitive kind.
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Bool => Self::Bool,
            PrimitiveKind::Char => Self::Char,
            PrimitiveKind::I8 => Self::I8,
            PrimitiveKind::U8 => Self::U8,
            PrimitiveKind::I16 => Self::I16,
            PrimitiveKind::U16 => Self::U16,
            PrimitiveKind::I32 => Self::I32,
            PrimitiveKind::U32 => Self::U32,
            PrimitiveKind::I64 => Self::I64,
            PrimitiveKind::U64 => Self::U64,
            PrimitiveKind::F32 => Self::F32,
            PrimitiveKind::F64 => Self::F64,
        }
    }

    /// Returns the primitive kind of a primitive tag.
    pub const fn as_primitive(self) -> Option<PrimitiveKind> {
        Some(match self {
            Self::Bool => PrimitiveKind::Bool,
            Self::Char => PrimitiveKind::Char,
            Self::I8 => PrimitiveKind::I8,
            Self::U8 => PrimitiveKind::U8,
            Self::I16 => PrimitiveKind::I16,
            Self::U16 => PrimitiveKind::U16,
            Self::I32 => PrimitiveKind::I32,
            Self::U32 => PrimitiveKind::U32,
            Self::I64 => PrimitiveKind::I64,
            Self::U64 => PrimitiveKind::U64,
            Self::F32 => PrimitiveKind::F32,
            Self::F64 => PrimitiveKind::F64,
            _ => return None,
        })
    }

    /// Whether the tag starts a forward-definition record.
    #[inline]
    pub const fn is_record(self) -> bool {
        matches!(
            self,
            Self::Array | Self::Sequence | Self::Mapping | Self::Object
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::BackRef => "back-reference",
            Self::Text => "text",
            Self::Enum => "enum",
            Self::Array => "array",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::ReflectionHandle => "reflection handle",
            Self::Object => "object",
            Self::Struct => "struct",
            _ => match self.as_primitive() {
                Some(kind) => kind.name(),
                None => "unknown",
            },
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = MalformedStream;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(MalformedStream::UnknownTag(value))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// Tests
