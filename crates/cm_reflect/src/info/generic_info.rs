use core::fmt;

use crate::info::TypePath;

// -----------------------------------------------------------------------------
// ContainerKind

/// The capability a generic container definition provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// An ordered sequence of elements, e.g. `Vec<T>`.
    Sequence,
    /// An insertion-ordered key/value mapping, e.g. `Map<K, V>`.
    Mapping,
}

impl ContainerKind {
    /// The number of type arguments an instantiation takes.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            Self::Sequence => 1,
            Self::Mapping => 2,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => f.pad("sequence"),
            Self::Mapping => f.pad("mapping"),
        }
    }
}

// -----------------------------------------------------------------------------
// GenericInfo

/// A generic container definition, registered under its bare identifier.
///
/// Registering `GenericInfo::sequence("Queue")` makes every `Queue<T>`
/// classify as a sequence of `T`.
#[derive(Debug, Clone)]
pub struct GenericInfo {
    path: TypePath,
    kind: ContainerKind,
}

impl GenericInfo {
    pub fn sequence(ident: &str) -> Self {
        Self {
            path: TypePath::from(ident),
            kind: ContainerKind::Sequence,
        }
    }

    pub fn mapping(ident: &str) -> Self {
        Self {
            path: TypePath::from(ident),
            kind: ContainerKind::Mapping,
        }
    }

    /// Returns the bare identifier, e.g. `Vec`.
    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
    }

    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }
}
