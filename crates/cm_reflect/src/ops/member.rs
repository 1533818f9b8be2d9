use alloc::sync::Arc;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{FieldInfo, MemberKind, MethodInfo, TypePath};

/// A shared handle to a declared method or field.
///
/// Handles compare by identity: two handles are equal only if they point
/// at the same descriptor in the same registry. Looking the same member up
/// twice through the [`TypeCatalog`] yields equal handles.
///
/// [`TypeCatalog`]: crate::catalog::TypeCatalog
#[derive(Debug, Clone)]
pub enum MemberHandle {
    Method(Arc<MethodInfo>),
    Field(Arc<FieldInfo>),
}

impl MemberHandle {
    #[inline]
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Method(_) => MemberKind::Method,
            Self::Field(_) => MemberKind::Field,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Method(info) => info.name(),
            Self::Field(info) => info.name(),
        }
    }

    /// Returns the type that declares the member.
    #[inline]
    pub fn declaring(&self) -> &TypePath {
        match self {
            Self::Method(info) => info.declaring(),
            Self::Field(info) => info.declaring(),
        }
    }

    /// Whether both handles point at the same descriptor.
    pub fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Method(a), Self::Method(b)) => Arc::ptr_eq(a, b),
            (Self::Field(a), Self::Field(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_method(&self) -> Option<&Arc<MethodInfo>> {
        match self {
            Self::Method(info) => Some(info),
            Self::Field(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&Arc<FieldInfo>> {
        match self {
            Self::Field(info) => Some(info),
            Self::Method(_) => None,
        }
    }
}

impl PartialEq for MemberHandle {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl Eq for MemberHandle {}

impl Hash for MemberHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Self::Method(info) => core::ptr::hash(Arc::as_ptr(info), state),
            Self::Field(info) => core::ptr::hash(Arc::as_ptr(info), state),
        }
    }
}

impl fmt::Display for MemberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}::{}", self.kind(), self.declaring(), self.name())
    }
}
