use std::io::Read;

use cm_reflect::ReflectError;
use cm_reflect::catalog::{TypeCatalog, TypeShape};
use cm_reflect::info::{OBJECT, TypePath};
use cm_reflect::ops::{EnumValue, Graph, Heap, ObjectId, Value};

use crate::codec::{StreamReader, Tag};
use crate::tracker::DecodeTracker;
use crate::{DeserializeError, MalformedStream, SerialConfig, UnresolvedMember};

#[cfg(all(feature = "debug", debug_assertions))]
use crate::type_stack::TypeStack;

// -----------------------------------------------------------------------------
// GraphDecoder

/// Reads one object graph from a byte source.
///
/// Every forward definition is decoded in two phases. First an empty
/// instance of the recorded concrete type is allocated and registered
/// under its reference id; then its payload is read. A back-reference met
/// while reading a payload, even one pointing at an instance that is
/// still being populated, resolves to the registered instance.
///
/// Reflection handles are re-bound by name against the live
/// [`TypeCatalog`], see [`UnresolvedMember`] for what happens when the
/// member is gone.
///
/// A decoder is a single session: create one per graph.
///
/// # Examples
///
/// ```
/// use cm_reflect::catalog::TypeCatalog;
/// use cm_reflect::ops::Value;
/// use cm_reflect::registry::TypeRegistry;
/// use cm_serial::SerialConfig;
/// use cm_serial::de::GraphDecoder;
///
/// let catalog = TypeCatalog::new(TypeRegistry::new());
/// let config = SerialConfig::new();
/// let bytes: &[u8] = &[8, 0x39, 0x05, 0, 0];
///
/// let mut decoder = GraphDecoder::new(&catalog, &config, bytes);
/// let root = decoder.read().unwrap();
/// assert_eq!(root, Value::from(1337));
/// ```
pub struct GraphDecoder<'a, R: Read> {
    catalog: &'a TypeCatalog,
    config: &'a SerialConfig,
    reader: StreamReader<R>,
    tracker: DecodeTracker,
    heap: Heap,
    depth: usize,
    #[cfg(all(feature = "debug", debug_assertions))]
    stack: TypeStack,
}

impl<'a, R: Read> GraphDecoder<'a, R> {
    pub fn new(catalog: &'a TypeCatalog, config: &'a SerialConfig, reader: R) -> Self {
        Self {
            catalog,
            config,
            reader: StreamReader::new(reader, config.max_length()),
            tracker: DecodeTracker::new(),
            heap: Heap::new(),
            depth: 0,
            #[cfg(all(feature = "debug", debug_assertions))]
            stack: TypeStack::new(),
        }
    }

    /// Reads a root declared as `Object`.
    #[inline]
    pub fn read(&mut self) -> Result<Value, DeserializeError> {
        self.read_as(&TypePath::from(OBJECT))
    }

    /// Reads a root declared as `declared`, the type it was written as.
    pub fn read_as(&mut self, declared: &TypePath) -> Result<Value, DeserializeError> {
        log::debug!("deserializing a root declared as `{declared}`");
        let result = self.read_value(declared);
        match &result {
            Ok(_) => log::debug!("deserialized {} record(s)", self.tracker.len()),
            Err(err) => self.log_failure(err),
        }
        result
    }

    /// Returns the decoded heap and the underlying reader.
    pub fn finish(self) -> (Heap, R) {
        (self.heap, self.reader.into_inner())
    }

    /// Returns the decoded graph, dropping the reader.
    pub fn into_graph(self, root: Value) -> Graph {
        Graph::new(self.heap, root)
    }

    #[inline]
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    fn log_failure(&self, err: &DeserializeError) {
        #[cfg(all(feature = "debug", debug_assertions))]
        log::error!("deserialization failed: {err} (stack:\n{:?})", self.stack);
        #[cfg(not(all(feature = "debug", debug_assertions)))]
        log::error!("deserialization failed: {err}");
    }

    fn read_value(&mut self, declared: &TypePath) -> Result<Value, DeserializeError> {
        if self.depth >= self.config.max_depth() {
            return Err(DeserializeError::DepthLimitExceeded(self.config.max_depth()));
        }
        self.depth += 1;

        let tag = self.reader.read_tag()?;
        let value = match tag {
            Tag::Null => Value::Null,
            Tag::BackRef => {
                let id = self.reader.read_u32()?;
                Value::Ref(self.tracker.placeholder_for(id)?)
            }
            Tag::Text => Value::Text(self.reader.read_str()?),
            Tag::Enum => Value::Enum(self.read_enum()?),
            Tag::ReflectionHandle => self.read_member()?,
            Tag::Struct => {
                let value = self.read_struct(declared)?;
                self.depth -= 1;
                return Ok(value);
            }
            Tag::Array | Tag::Sequence | Tag::Mapping | Tag::Object => {
                let object = self.read_record(tag, declared)?;
                self.depth -= 1;
                return Ok(Value::Ref(object));
            }
            _ => match tag.as_primitive() {
                Some(kind) => Value::Primitive(self.reader.read_primitive(kind)?),
                None => return Err(MalformedStream::UnknownTag(tag as u8).into()),
            },
        };
        self.check(declared, &value)?;

        self.depth -= 1;
        Ok(value)
    }

    /// Rejects a value the encoder could not have written into this slot.
    fn check(&self, declared: &TypePath, value: &Value) -> Result<(), DeserializeError> {
        if self.catalog.accepts(declared, value, &self.heap)? {
            return Ok(());
        }
        let malformed = match value.type_path(&self.heap) {
            Some(found) => MalformedStream::TypeMismatch {
                declared: declared.clone(),
                found,
            },
            None => MalformedStream::UnexpectedNull(declared.clone()),
        };
        Err(malformed.into())
    }

    fn read_type(&mut self) -> Result<TypePath, DeserializeError> {
        let name = self.reader.read_str()?;
        Ok(TypePath::new(&name)?)
    }

    fn read_enum(&mut self) -> Result<EnumValue, DeserializeError> {
        let ty = self.read_type()?;
        let underlying = match &*self.catalog.shape_of(&ty)? {
            TypeShape::Enum { underlying, .. } => *underlying,
            _ => {
                return Err(MalformedStream::InvalidType(ReflectError::ShapeMismatch {
                    path: ty,
                    expected: "an enum",
                })
                .into());
            }
        };
        let tag = self.reader.read_tag()?;
        if tag.as_primitive() != Some(underlying) {
            return Err(MalformedStream::UnexpectedTag {
                tag,
                expected: "the enum's underlying kind",
            }
            .into());
        }
        let value = self.reader.read_primitive(underlying)?;
        Ok(EnumValue::new(ty, value))
    }

    fn read_member(&mut self) -> Result<Value, DeserializeError> {
        let declaring = self.read_type()?;
        let name = self.reader.read_str()?;
        let kind = self.reader.read_member_kind()?;
        match self.catalog.resolve_member(&declaring, &name, kind) {
            Ok(handle) => Ok(Value::Member(handle)),
            Err(err) => match self.config.unresolved_member() {
                UnresolvedMember::Fail => Err(DeserializeError::ReflectionResolution {
                    declaring,
                    member: name,
                    kind,
                }),
                UnresolvedMember::Substitute => {
                    log::warn!("substituting null for an unresolved member handle: {err}");
                    Ok(Value::Null)
                }
            },
        }
    }

    fn read_struct(&mut self, declared: &TypePath) -> Result<Value, DeserializeError> {
        let ty = self.read_type()?;
        let data = self.catalog.new_struct(&ty)?;
        let mut value = Value::Struct(data);
        self.check(declared, &value)?;

        let count = self.reader.read_len()?;
        let layout = self.catalog.fields_of(&ty)?;
        if count != layout.len() {
            return Err(MalformedStream::FieldCount {
                ty,
                expected: layout.len(),
                found: count,
            }
            .into());
        }

        #[cfg(all(feature = "debug", debug_assertions))]
        self.stack.push(ty.clone());
        for (index, field) in layout.fields().iter().enumerate() {
            let field_value = self.read_value(field.ty())?;
            if let Some(slot) = value.as_struct_mut().and_then(|data| data.get_at_mut(index)) {
                *slot = field_value;
            }
        }
        #[cfg(all(feature = "debug", debug_assertions))]
        self.stack.pop();
        Ok(value)
    }

    /// Reads a forward definition: allocate, register, then populate.
    fn read_record(&mut self, tag: Tag, declared: &TypePath) -> Result<ObjectId, DeserializeError> {
        let id = self.reader.read_u32()?;
        let ty = self.read_type()?;
        let shape = self.catalog.shape_of(&ty)?;

        let matches = matches!(
            (tag, &*shape),
            (Tag::Array, TypeShape::Array(_))
                | (Tag::Sequence, TypeShape::Sequence(_))
                | (Tag::Mapping, TypeShape::Mapping(..))
                | (Tag::Object, TypeShape::Object(_))
        );
        if !matches {
            return Err(MalformedStream::UnexpectedTag {
                tag,
                expected: shape.name(),
            }
            .into());
        }

        let object = self.heap.alloc(self.catalog.instantiate(&ty)?);
        let reference = self.tracker.register(id, object)?;
        self.check(declared, &Value::Ref(object))?;
        log::trace!("record {reference} `{ty}`");

        #[cfg(all(feature = "debug", debug_assertions))]
        self.stack.push(ty.clone());
        match &*shape {
            TypeShape::Array(elem) | TypeShape::Sequence(elem) => {
                let len = self.reader.read_len()?;
                for _ in 0..len {
                    let item = self.read_value(elem.path())?;
                    if let Some(items) = self.heap.list_mut(object) {
                        items.push(item);
                    }
                }
            }
            TypeShape::Mapping(key_ty, value_ty) => {
                let len = self.reader.read_len()?;
                for _ in 0..len {
                    let key = self.read_value(key_ty.path())?;
                    let value = self.read_value(value_ty.path())?;
                    if let Some(map) = self.heap.map_mut(object) {
                        map.insert(key, value);
                    }
                }
            }
            TypeShape::Object(layout) => {
                let count = self.reader.read_len()?;
                if count != layout.len() {
                    return Err(MalformedStream::FieldCount {
                        ty,
                        expected: layout.len(),
                        found: count,
                    }
                    .into());
                }
                for (index, field) in layout.fields().iter().enumerate() {
                    let value = self.read_value(field.ty())?;
                    if let Some(slot) = self
                        .heap
                        .object_mut(object)
                        .and_then(|data| data.get_at_mut(index))
                    {
                        *slot = value;
                    }
                }
            }
            _ => {}
        }
        #[cfg(all(feature = "debug", debug_assertions))]
        self.stack.pop();
        Ok(object)
    }
}
