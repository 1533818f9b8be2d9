use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::info::{PrimitiveKind, TypePath};

/// Descriptor of an enum: an underlying integer kind plus named variants.
///
/// The order of variants is fixed, depends on the declaration order.
/// Values outside the declared variants are still legal enum values, the
/// same way a flags enum may hold any combination of bits.
///
/// # Examples
///
/// ```
/// use cm_reflect::info::{EnumInfo, PrimitiveKind};
///
/// let info = EnumInfo::new("NestedEnum")
///     .with_variant("Nested_Quite", 0)
///     .with_variant("Nested_NotQuite", 1);
///
/// assert_eq!(info.underlying(), PrimitiveKind::I32);
/// assert_eq!(info.variant("Nested_NotQuite"), Some(1));
/// assert_eq!(info.variant_name(0), Some("Nested_Quite"));
/// ```
#[derive(Debug, Clone)]
pub struct EnumInfo {
    path: TypePath,
    underlying: PrimitiveKind,
    variants: Vec<(Arc<str>, i128)>,
}

impl EnumInfo {
    /// Creates an enum backed by `i32`.
    pub fn new(path: impl Into<TypePath>) -> Self {
        Self {
            path: path.into(),
            underlying: PrimitiveKind::I32,
            variants: Vec::new(),
        }
    }

    /// Changes the underlying kind, which must be an integer kind.
    pub fn with_underlying(mut self, kind: PrimitiveKind) -> Self {
        self.underlying = kind;
        self
    }

    pub fn with_variant(mut self, name: &str, value: i128) -> Self {
        self.variants.push((Arc::from(name), value));
        self
    }

    #[inline]
    pub fn path(&self) -> &TypePath {
        &self.path
    }

    #[inline]
    pub fn underlying(&self) -> PrimitiveKind {
        self.underlying
    }

    /// Returns the value of the variant named `name`.
    pub fn variant(&self, name: &str) -> Option<i128> {
        self.variants
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| *v)
    }

    /// Returns the first variant declared with `value`.
    pub fn variant_name(&self, value: i128) -> Option<&str> {
        self.variants
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, _)| &**n)
    }

    /// Returns an iterator over `(name, value)` in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, i128)> {
        self.variants.iter().map(|(n, v)| (&**n, *v))
    }
}
