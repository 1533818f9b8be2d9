use alloc::vec::Vec;
use std::io::{Cursor, Read, Write};

use cm_reflect::catalog::TypeCatalog;
use cm_reflect::info::{OBJECT, TypePath};
use cm_reflect::ops::{Graph, Heap, Value};

use crate::de::GraphDecoder;
use crate::ser::GraphEncoder;
use crate::{DeserializeError, MalformedStream, SerialConfig, SerializeError};

// -----------------------------------------------------------------------------
// GraphSerializer

/// Serializes object graphs to, and deserializes them from, byte streams.
///
/// The serializer itself holds no session state. Each call runs a fresh
/// [`GraphEncoder`] or [`GraphDecoder`], so one serializer can be reused
/// for any number of calls and shared between threads.
///
/// # Examples
///
/// ```
/// use cm_reflect::catalog::TypeCatalog;
/// use cm_reflect::info::ObjectInfo;
/// use cm_reflect::ops::{Heap, Value};
/// use cm_reflect::registry::TypeRegistry;
/// use cm_serial::GraphSerializer;
///
/// let mut registry = TypeRegistry::new();
/// registry.register(ObjectInfo::new("Node").with_field("Name", "String").with_field("Next", "Node"));
/// let catalog = TypeCatalog::new(registry);
///
/// // a -> b -> a
/// let mut heap = Heap::new();
/// let a = heap.alloc(catalog.instantiate(&"Node".into()).unwrap());
/// let b = heap.alloc(catalog.instantiate(&"Node".into()).unwrap());
/// heap.object_mut(a).unwrap().set("Name", "a").unwrap();
/// heap.object_mut(a).unwrap().set("Next", b).unwrap();
/// heap.object_mut(b).unwrap().set("Name", "b").unwrap();
/// heap.object_mut(b).unwrap().set("Next", a).unwrap();
///
/// let serializer = GraphSerializer::new(&catalog);
/// let bytes = serializer.serialize_to_vec(&heap, &Value::Ref(a)).unwrap();
/// let graph = serializer.deserialize_from_slice(&bytes).unwrap();
///
/// let a2 = graph.root_id().unwrap();
/// let b2 = graph.heap.object(a2).unwrap().get("Next").unwrap().as_object_id().unwrap();
/// let back = graph.heap.object(b2).unwrap().get("Next").unwrap();
/// assert_eq!(back, &Value::Ref(a2));
/// assert_eq!(graph.heap.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GraphSerializer<'a> {
    catalog: &'a TypeCatalog,
    config: SerialConfig,
}

impl<'a> GraphSerializer<'a> {
    /// Creates a serializer with the default [`SerialConfig`].
    #[inline]
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self::with_config(catalog, SerialConfig::new())
    }

    #[inline]
    pub fn with_config(catalog: &'a TypeCatalog, config: SerialConfig) -> Self {
        Self { catalog, config }
    }

    #[inline]
    pub fn catalog(&self) -> &'a TypeCatalog {
        self.catalog
    }

    #[inline]
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Writes the graph reachable from `root` to `writer`.
    ///
    /// The root is declared as `Object`, so any value is accepted.
    #[inline]
    pub fn serialize<W: Write>(&self, writer: W, heap: &Heap, root: &Value) -> Result<(), SerializeError> {
        self.serialize_as(writer, heap, &TypePath::from(OBJECT), root)
    }

    /// Writes the graph reachable from `root`, checked against `declared`.
    pub fn serialize_as<W: Write>(
        &self,
        writer: W,
        heap: &Heap,
        declared: &TypePath,
        root: &Value,
    ) -> Result<(), SerializeError> {
        let mut encoder = GraphEncoder::new(self.catalog, heap, &self.config, writer);
        encoder.write_as(declared, root)?;
        encoder.finish()?;
        Ok(())
    }

    /// Reads one graph from `reader`.
    ///
    /// Reading stops right after the root value, the rest of the stream is
    /// left untouched.
    #[inline]
    pub fn deserialize<R: Read>(&self, reader: R) -> Result<Graph, DeserializeError> {
        self.deserialize_as(reader, &TypePath::from(OBJECT))
    }

    /// Reads one graph whose root was written as `declared`.
    pub fn deserialize_as<R: Read>(&self, reader: R, declared: &TypePath) -> Result<Graph, DeserializeError> {
        let mut decoder = GraphDecoder::new(self.catalog, &self.config, reader);
        let root = decoder.read_as(declared)?;
        Ok(decoder.into_graph(root))
    }

    pub fn serialize_to_vec(&self, heap: &Heap, root: &Value) -> Result<Vec<u8>, SerializeError> {
        let mut bytes = Vec::new();
        self.serialize(&mut bytes, heap, root)?;
        Ok(bytes)
    }

    /// Reads one graph that must span the whole slice.
    pub fn deserialize_from_slice(&self, bytes: &[u8]) -> Result<Graph, DeserializeError> {
        let mut decoder = GraphDecoder::new(self.catalog, &self.config, Cursor::new(bytes));
        let root = decoder.read()?;
        let (heap, cursor) = decoder.finish();
        let trailing = bytes.len() - cursor.position() as usize;
        if trailing != 0 {
            return Err(MalformedStream::TrailingBytes(trailing).into());
        }
        Ok(Graph::new(heap, root))
    }
}

// -----------------------------------------------------------------------------
// Free functions

/// Writes a graph with the default [`SerialConfig`].
///
/// See [`GraphSerializer::serialize`].
#[inline]
pub fn serialize<W: Write>(
    catalog: &TypeCatalog,
    writer: W,
    heap: &Heap,
    root: &Value,
) -> Result<(), SerializeError> {
    GraphSerializer::new(catalog).serialize(writer, heap, root)
}

/// Reads a graph with the default [`SerialConfig`].
///
/// See [`GraphSerializer::deserialize`].
#[inline]
pub fn deserialize<R: Read>(catalog: &TypeCatalog, reader: R) -> Result<Graph, DeserializeError> {
    GraphSerializer::new(catalog).deserialize(reader)
}
