use crate::info::TypePath;

/// Descriptor of a type the serializer refuses to handle, such as a
/// delegate or a raw native pointer.
///
/// Registering such types explicitly turns "unknown type" failures into
/// precise "unsupported type" failures.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    path: TypePath,
}

impl OpaqueInfo {
    pub fn new(path: impl Into<TypePath>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
    }
}
