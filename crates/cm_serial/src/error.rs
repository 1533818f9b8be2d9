use alloc::string::String;
use std::io;

use cm_reflect::ReflectError;
use cm_reflect::info::{MemberKind, TypePath};
use cm_reflect::ops::ObjectId;
use thiserror::Error;

use crate::codec::Tag;

// -----------------------------------------------------------------------------
// SerializeError

/// Errors raised while encoding a graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerializeError {
    /// A value's runtime type has no serializable shape.
    #[error("type `{0}` cannot be serialized")]
    UnsupportedType(TypePath),

    #[error("a value of type `{found}` cannot be stored as `{declared}`")]
    TypeMismatch { declared: TypePath, found: TypePath },

    #[error("null cannot be stored as `{0}`")]
    UnexpectedNull(TypePath),

    /// The payload of a value disagrees with its own type.
    #[error("value of type `{ty}` does not hold {expected}")]
    ShapeMismatch { ty: TypePath, expected: &'static str },

    #[error("reference {0:?} does not point into the heap")]
    DanglingObject(ObjectId),

    #[error("nesting exceeds the depth limit of {0}")]
    DepthLimitExceeded(usize),

    #[error("length {len} exceeds the limit of {max}")]
    LengthLimit { len: usize, max: u32 },

    #[error("graph holds more objects than reference ids can address")]
    TooManyObjects,

    #[error("invalid type: {0}")]
    InvalidType(ReflectError),

    #[error("failed to write the stream")]
    Write(#[source] io::Error),
}

impl From<io::Error> for SerializeError {
    #[inline]
    fn from(value: io::Error) -> Self {
        Self::Write(value)
    }
}

impl From<ReflectError> for SerializeError {
    fn from(value: ReflectError) -> Self {
        match value {
            ReflectError::Unsupported(path) | ReflectError::UnknownType(path) => {
                Self::UnsupportedType(path)
            }
            other => Self::InvalidType(other),
        }
    }
}

// -----------------------------------------------------------------------------
// MalformedStream

/// The ways an input stream can be inconsistent.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MalformedStream {
    #[error("the stream ended unexpectedly")]
    Truncated,

    #[error("unknown tag byte {0:#04x}")]
    UnknownTag(u8),

    #[error("tag `{tag}` is not valid here, expected {expected}")]
    UnexpectedTag { tag: Tag, expected: &'static str },

    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    #[error("invalid char scalar value {0:#x}")]
    InvalidChar(u32),

    #[error("invalid member kind byte {0:#04x}")]
    InvalidMemberKind(u8),

    #[error("text is not valid UTF-8")]
    InvalidUtf8,

    #[error("length {len} exceeds the limit of {max}")]
    LengthLimit { len: u32, max: u32 },

    #[error("back-reference to undefined id {0}")]
    UndefinedReference(u32),

    #[error("expected reference id {expected}, found {found}")]
    OutOfOrderId { expected: u32, found: u32 },

    #[error("a value of type `{found}` cannot be stored as `{declared}`")]
    TypeMismatch { declared: TypePath, found: TypePath },

    #[error("null cannot be stored as `{0}`")]
    UnexpectedNull(TypePath),

    #[error("type `{ty}` has {expected} fields, the stream has {found}")]
    FieldCount {
        ty: TypePath,
        expected: usize,
        found: usize,
    },

    #[error("invalid type: {0}")]
    InvalidType(ReflectError),

    #[error("{0} trailing byte(s) after the root value")]
    TrailingBytes(usize),
}

// -----------------------------------------------------------------------------
// DeserializeError

/// Errors raised while decoding a graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeserializeError {
    #[error("malformed stream: {0}")]
    Malformed(#[from] MalformedStream),

    /// A reflection handle names a member that no longer exists.
    #[error("cannot resolve {kind} `{member}` of type `{declaring}`")]
    ReflectionResolution {
        declaring: TypePath,
        member: String,
        kind: MemberKind,
    },

    #[error("type `{0}` cannot be deserialized")]
    UnsupportedType(TypePath),

    #[error("nesting exceeds the depth limit of {0}")]
    DepthLimitExceeded(usize),

    #[error("failed to read the stream")]
    Read(#[source] io::Error),
}

impl From<io::Error> for DeserializeError {
    fn from(value: io::Error) -> Self {
        if value.kind() == io::ErrorKind::UnexpectedEof {
            Self::Malformed(MalformedStream::Truncated)
        } else {
            Self::Read(value)
        }
    }
}

impl From<ReflectError> for DeserializeError {
    fn from(value: ReflectError) -> Self {
        match value {
            ReflectError::Unsupported(path) => Self::UnsupportedType(path),
            other => Self::Malformed(MalformedStream::InvalidType(other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::io;

    use cm_reflect::ReflectError;
    use cm_reflect::info::TypePath;

    use super::{DeserializeError, MalformedStream, SerializeError};

    #[test]
    fn eof_is_truncation() {
        let err = DeserializeError::from(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(matches!(err, DeserializeError::Malformed(MalformedStream::Truncated)));

        let err = DeserializeError::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, DeserializeError::Read(_)));
    }

    #[test]
    fn reflect_errors_map_to_unsupported() {
        let path = TypePath::from("Delegate");
        let err = SerializeError::from(ReflectError::Unsupported(path.clone()));
        assert!(matches!(err, SerializeError::UnsupportedType(p) if p == path));

        let err = SerializeError::from(ReflectError::UnknownType(path.clone()));
        assert!(matches!(err, SerializeError::UnsupportedType(_)));

        let err = DeserializeError::from(ReflectError::UnknownType(path));
        assert!(matches!(
            err,
            DeserializeError::Malformed(MalformedStream::InvalidType(ReflectError::UnknownType(_)))
        ));
    }
}
