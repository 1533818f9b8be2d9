use alloc::sync::Arc;
use core::fmt;

use crate::info::TypePath;

// -----------------------------------------------------------------------------
// MemberKind

/// Discriminates the two kinds of reflection member handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Field,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method => f.pad("method"),
            Self::Field => f.pad("field"),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A field declared by an object type.
///
/// Static fields are described so they can be looked up as member handles,
/// but they never take part in an object's layout.
///
/// # Examples
///
/// ```
/// use cm_reflect::info::ObjectInfo;
///
/// let info = ObjectInfo::new("Player")
///     .with_field("Health", "i32")
///     .with_static_field("Count", "i32");
///
/// let health = info.field("Health").unwrap();
/// assert_eq!(health.ty().as_str(), "i32");
/// assert_eq!(health.declaring().as_str(), "Player");
/// assert!(info.field("Count").unwrap().is_static());
/// ```
#[derive(Debug)]
pub struct FieldInfo {
    name: Arc<str>,
    ty: TypePath,
    declaring: TypePath,
    is_static: bool,
}

impl FieldInfo {
    pub(crate) fn new(name: &str, ty: TypePath, declaring: TypePath, is_static: bool) -> Self {
        Self {
            name: Arc::from(name),
            ty,
            declaring,
            is_static,
        }
    }

    /// Returns the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared (static) type of the field.
    #[inline]
    pub fn ty(&self) -> &TypePath {
        &self.ty
    }

    /// Returns the type that declares this field.
    #[inline]
    pub fn declaring(&self) -> &TypePath {
        &self.declaring
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

// -----------------------------------------------------------------------------
// MethodInfo

/// A method declared by an object or interface type.
///
/// Methods carry no behaviour here, they only exist so that member handles
/// can refer to them by name.
#[derive(Debug)]
pub struct MethodInfo {
    name: Arc<str>,
    declaring: TypePath,
    is_static: bool,
}

impl MethodInfo {
    pub(crate) fn new(name: &str, declaring: TypePath, is_static: bool) -> Self {
        Self {
            name: Arc::from(name),
            declaring,
            is_static,
        }
    }

    /// Returns the method name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type that declares this method.
    #[inline]
    pub fn declaring(&self) -> &TypePath {
        &self.declaring
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}
