use alloc::vec::Vec;

use slotmap::{SlotMap, new_key_type};

use crate::info::TypePath;
use crate::ops::{MapData, ObjectData, Value};

new_key_type! {
    /// The identity of a heap instance.
    ///
    /// Two values refer to the same instance exactly when their ids are
    /// equal, whatever the contents of the instance.
    pub struct ObjectId;
}

// -----------------------------------------------------------------------------
// Instance

/// The payload of a heap instance.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceData {
    Array(Vec<Value>),
    Sequence(Vec<Value>),
    Mapping(MapData),
    Object(ObjectData),
}

/// A reference-typed value: its concrete type and its payload.
///
/// Instances are normally created empty by [`TypeCatalog::instantiate`]
/// and then filled in place.
///
/// [`TypeCatalog::instantiate`]: crate::catalog::TypeCatalog::instantiate
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    ty: TypePath,
    data: InstanceData,
}

impl Instance {
    /// Creates an instance without checking `data` against `ty`.
    #[inline]
    pub fn new(ty: impl Into<TypePath>, data: InstanceData) -> Self {
        Self {
            ty: ty.into(),
            data,
        }
    }

    /// Returns the concrete type.
    #[inline]
    pub fn ty(&self) -> &TypePath {
        &self.ty
    }

    #[inline]
    pub fn data(&self) -> &InstanceData {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut InstanceData {
        &mut self.data
    }

    /// Returns the elements of an array or a sequence.
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match &self.data {
            InstanceData::Array(items) | InstanceData::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match &mut self.data {
            InstanceData::Array(items) | InstanceData::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapData> {
        match &self.data {
            InstanceData::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut MapData> {
        match &mut self.data {
            InstanceData::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectData> {
        match &self.data {
            InstanceData::Object(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectData> {
        match &mut self.data {
            InstanceData::Object(data) => Some(data),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Heap

/// An arena owning every reference-typed instance of a graph.
///
/// Shared and cyclic references are plain repeated [`ObjectId`]s, so a
/// cyclic graph needs no interior mutability and is freed as a whole.
///
/// # Examples
///
/// ```
/// use cm_reflect::info::TypePath;
/// use cm_reflect::ops::{Heap, Instance, InstanceData, Value};
///
/// let mut heap = Heap::new();
/// let list = heap.alloc(Instance::new("List<Object>", InstanceData::Sequence(Vec::new())));
///
/// // A list containing itself.
/// heap.list_mut(list).unwrap().push(Value::Ref(list));
/// assert_eq!(heap.list(list).unwrap()[0], Value::Ref(list));
/// assert_eq!(heap.get(list).unwrap().ty(), &TypePath::from("List<Object>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Heap {
    instances: SlotMap<ObjectId, Instance>,
}

impl Heap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self, instance: Instance) -> ObjectId {
        self.instances.insert(instance)
    }

    #[inline]
    pub fn remove(&mut self, id: ObjectId) -> Option<Instance> {
        self.instances.remove(id)
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.instances.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&Instance> {
        self.instances.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Instance> {
        self.instances.get_mut(id)
    }

    #[inline]
    pub fn object(&self, id: ObjectId) -> Option<&ObjectData> {
        self.get(id)?.as_object()
    }

    #[inline]
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut ObjectData> {
        self.get_mut(id)?.as_object_mut()
    }

    #[inline]
    pub fn list(&self, id: ObjectId) -> Option<&Vec<Value>> {
        self.get(id)?.as_list()
    }

    #[inline]
    pub fn list_mut(&mut self, id: ObjectId) -> Option<&mut Vec<Value>> {
        self.get_mut(id)?.as_list_mut()
    }

    #[inline]
    pub fn map(&self, id: ObjectId) -> Option<&MapData> {
        self.get(id)?.as_map()
    }

    #[inline]
    pub fn map_mut(&mut self, id: ObjectId) -> Option<&mut MapData> {
        self.get_mut(id)?.as_map_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Instance)> {
        self.instances.iter()
    }
}

// -----------------------------------------------------------------------------
// Graph

/// A root value together with the heap its references point into.
///
/// This is what deserialization hands back to the caller.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub heap: Heap,
    pub root: Value,
}

impl Graph {
    #[inline]
    pub fn new(heap: Heap, root: Value) -> Self {
        Self { heap, root }
    }

    #[inline]
    pub fn into_parts(self) -> (Heap, Value) {
        (self.heap, self.root)
    }

    /// Returns the heap id of the root, if it is a reference.
    #[inline]
    pub fn root_id(&self) -> Option<ObjectId> {
        self.root.as_object_id()
    }
}
