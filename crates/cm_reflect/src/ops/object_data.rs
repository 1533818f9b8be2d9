use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::hash::{Hash, Hasher};

use crate::ReflectError;
use crate::catalog::ObjectLayout;
use crate::info::TypePath;
use crate::ops::Value;

/// The field values of an object, one slot per field of its [`ObjectLayout`].
///
/// Used both for heap objects and for inline value-type structs.
#[derive(Debug, Clone)]
pub struct ObjectData {
    layout: Arc<ObjectLayout>,
    values: Box<[Value]>,
}

impl ObjectData {
    /// # Panics
    /// Debug builds panic if `values` does not match the layout length.
    pub(crate) fn new(layout: Arc<ObjectLayout>, values: Box<[Value]>) -> Self {
        debug_assert_eq!(layout.len(), values.len());
        Self { layout, values }
    }

    #[inline]
    pub fn layout(&self) -> &Arc<ObjectLayout> {
        &self.layout
    }

    /// Returns the concrete type.
    #[inline]
    pub fn ty(&self) -> &TypePath {
        self.layout.path()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.layout.index_of(name).map(|index| &self.values[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.layout.index_of(name).map(|index| &mut self.values[index])
    }

    #[inline]
    pub fn get_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[inline]
    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }

    /// Replaces the field named `name`, returning the previous value.
    ///
    /// The value is not type checked here, a mismatch is reported when the
    /// graph is serialized.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Value, ReflectError> {
        match self.layout.index_of(name) {
            Some(index) => Ok(core::mem::replace(&mut self.values[index], value.into())),
            None => Err(ReflectError::UnknownField {
                ty: self.layout.path().clone(),
                field: String::from(name),
            }),
        }
    }

    /// Returns an iterator over `(field name, value)` in layout order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.layout
            .fields()
            .iter()
            .zip(self.values.iter())
            .map(|(field, value)| (field.name(), value))
    }
}

impl PartialEq for ObjectData {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.layout, &other.layout) || self.layout.path() == other.layout.path())
            && self.values == other.values
    }
}

impl Hash for ObjectData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.layout.path().hash(state);
        self.values.hash(state);
    }
}
