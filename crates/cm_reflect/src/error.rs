use alloc::string::String;

use thiserror::Error;

use crate::info::{MemberKind, TypePath};

// -----------------------------------------------------------------------------
// Error

/// Errors raised while describing, classifying or instantiating types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReflectError {
    #[error("`{0}` is not a valid type name")]
    InvalidTypeName(String),

    #[error("type `{0}` is not registered")]
    UnknownType(TypePath),

    #[error("type `{0}` has no serializable shape")]
    Unsupported(TypePath),

    #[error("type `{0}` is abstract and cannot be instantiated")]
    AbstractType(TypePath),

    #[error("inheritance chain of `{0}` is cyclic")]
    InheritanceCycle(TypePath),

    #[error("type `{path}` is not {expected}")]
    ShapeMismatch {
        path: TypePath,
        expected: &'static str,
    },

    #[error("generic type `{path}` expects {expected} type argument(s)")]
    GenericArity { path: TypePath, expected: usize },

    #[error("type `{ty}` has no field `{field}`")]
    UnknownField { ty: TypePath, field: String },

    #[error("enum `{ty}` has no variant `{variant}`")]
    UnknownVariant { ty: TypePath, variant: String },

    #[error("type `{ty}` has no {kind} `{name}`")]
    UnknownMember {
        ty: TypePath,
        name: String,
        kind: MemberKind,
    },

    #[error("value type `{0}` contains itself by value")]
    RecursiveValueType(TypePath),
}
