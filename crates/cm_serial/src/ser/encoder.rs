use alloc::sync::Arc;
use std::io::Write;

use cm_reflect::catalog::{TypeCatalog, TypeShape};
use cm_reflect::info::{FieldInfo, OBJECT, TypePath};
use cm_reflect::ops::{EnumValue, Heap, InstanceData, MemberHandle, ObjectData, ObjectId, Value};

use crate::codec::{StreamWriter, Tag};
use crate::tracker::EncodeTracker;
use crate::{SerialConfig, SerializeError};

#[cfg(all(feature = "debug", debug_assertions))]
use crate::type_stack::TypeStack;

// -----------------------------------------------------------------------------
// GraphEncoder

/// Writes one object graph to a byte sink.
///
/// The graph is walked depth-first in pre-order. Inline values
/// (primitives, text, enums, structs, member handles) are written where
/// they are met. A heap instance is written in full the first time it is
/// met, as a forward definition carrying a fresh reference id and its
/// concrete type name; every later encounter is a back-reference to that
/// id. Ids are assigned before payloads are written, so cycles need no
/// special handling.
///
/// An encoder is a single session: create one per graph.
///
/// # Examples
///
/// ```
/// use cm_reflect::catalog::TypeCatalog;
/// use cm_reflect::ops::{Heap, Value};
/// use cm_reflect::registry::TypeRegistry;
/// use cm_serial::SerialConfig;
/// use cm_serial::ser::GraphEncoder;
///
/// let catalog = TypeCatalog::new(TypeRegistry::new());
/// let heap = Heap::new();
/// let config = SerialConfig::new();
///
/// let mut encoder = GraphEncoder::new(&catalog, &heap, &config, Vec::new());
/// encoder.write(&Value::from("hi")).unwrap();
/// let bytes = encoder.finish().unwrap();
///
/// // Text tag, u32 length, UTF-8 bytes.
/// assert_eq!(bytes, [14, 2, 0, 0, 0, b'h', b'i']);
/// ```
pub struct GraphEncoder<'a, W: Write> {
    catalog: &'a TypeCatalog,
    heap: &'a Heap,
    config: &'a SerialConfig,
    writer: StreamWriter<W>,
    tracker: EncodeTracker,
    depth: usize,
    #[cfg(all(feature = "debug", debug_assertions))]
    stack: TypeStack,
}

impl<'a, W: Write> GraphEncoder<'a, W> {
    pub fn new(catalog: &'a TypeCatalog, heap: &'a Heap, config: &'a SerialConfig, writer: W) -> Self {
        Self {
            catalog,
            heap,
            config,
            writer: StreamWriter::new(writer),
            tracker: EncodeTracker::new(),
            depth: 0,
            #[cfg(all(feature = "debug", debug_assertions))]
            stack: TypeStack::new(),
        }
    }

    /// Writes `value` as a root declared as `Object`.
    #[inline]
    pub fn write(&mut self, value: &Value) -> Result<(), SerializeError> {
        self.write_as(&TypePath::from(OBJECT), value)
    }

    /// Writes `value` as a root declared as `declared`.
    ///
    /// The declared type is not transmitted, the decoder must be given the
    /// same one.
    pub fn write_as(&mut self, declared: &TypePath, value: &Value) -> Result<(), SerializeError> {
        log::debug!("serializing a root declared as `{declared}`");
        let result = self.write_value(declared, value);
        match &result {
            Ok(()) => log::debug!("serialized {} record(s)", self.tracker.len()),
            Err(err) => self.log_failure(err),
        }
        result
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> Result<W, SerializeError> {
        self.writer.flush()?;
        Ok(self.writer.into_inner())
    }

    /// Number of forward-definition records written so far.
    #[inline]
    pub fn records(&self) -> usize {
        self.tracker.len()
    }

    fn log_failure(&self, err: &SerializeError) {
        #[cfg(all(feature = "debug", debug_assertions))]
        log::error!("serialization failed: {err} (stack:\n{:?})", self.stack);
        #[cfg(not(all(feature = "debug", debug_assertions)))]
        log::error!("serialization failed: {err}");
    }

    fn write_value(&mut self, declared: &TypePath, value: &Value) -> Result<(), SerializeError> {
        if self.depth >= self.config.max_depth() {
            return Err(SerializeError::DepthLimitExceeded(self.config.max_depth()));
        }
        self.depth += 1;
        self.check(declared, value)?;

        match value {
            Value::Null => self.writer.write_tag(Tag::Null)?,
            Value::Primitive(p) => self.writer.write_primitive(*p)?,
            Value::Text(text) => {
                self.writer.write_tag(Tag::Text)?;
                self.write_str(text)?;
            }
            Value::Enum(e) => self.write_enum(e)?,
            Value::Struct(data) => self.write_struct(data)?,
            Value::Member(handle) => self.write_member(handle)?,
            Value::Ref(object) => self.write_ref(*object)?,
        }

        self.depth -= 1;
        Ok(())
    }

    /// Rejects values that the decoder would not accept in this slot.
    fn check(&self, declared: &TypePath, value: &Value) -> Result<(), SerializeError> {
        if let Value::Ref(object) = value
            && !self.heap.contains(*object)
        {
            return Err(SerializeError::DanglingObject(*object));
        }
        if self.catalog.accepts(declared, value, self.heap)? {
            return Ok(());
        }
        Err(match value.type_path(self.heap) {
            Some(found) => SerializeError::TypeMismatch {
                declared: declared.clone(),
                found,
            },
            None => SerializeError::UnexpectedNull(declared.clone()),
        })
    }

    fn write_str(&mut self, text: &str) -> Result<(), SerializeError> {
        self.check_len(text.len())?;
        self.writer.write_str(text)?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<(), SerializeError> {
        self.check_len(len)?;
        self.writer.write_u32(len as u32)?;
        Ok(())
    }

    fn check_len(&self, len: usize) -> Result<(), SerializeError> {
        let max = self.config.max_length();
        if len > max as usize {
            return Err(SerializeError::LengthLimit { len, max });
        }
        Ok(())
    }

    fn write_enum(&mut self, value: &EnumValue) -> Result<(), SerializeError> {
        match &*self.catalog.shape_of(value.ty())? {
            TypeShape::Enum { underlying, .. } if *underlying == value.value().kind() => {}
            _ => {
                return Err(SerializeError::ShapeMismatch {
                    ty: value.ty().clone(),
                    expected: "a value of the enum's underlying kind",
                });
            }
        }
        self.writer.write_tag(Tag::Enum)?;
        self.write_str(value.ty().as_str())?;
        self.writer.write_primitive(value.value())?;
        Ok(())
    }

    fn write_member(&mut self, handle: &MemberHandle) -> Result<(), SerializeError> {
        self.writer.write_tag(Tag::ReflectionHandle)?;
        self.write_str(handle.declaring().as_str())?;
        self.write_str(handle.name())?;
        self.writer.write_member_kind(handle.kind())?;
        Ok(())
    }

    fn write_struct(&mut self, data: &ObjectData) -> Result<(), SerializeError> {
        let ty = data.ty();
        let layout = self.catalog.fields_of(ty)?;
        if !layout.is_value_type() || data.len() != layout.len() {
            return Err(SerializeError::ShapeMismatch {
                ty: ty.clone(),
                expected: "the fields of a value type",
            });
        }
        self.writer.write_tag(Tag::Struct)?;
        self.write_str(ty.as_str())?;

        #[cfg(all(feature = "debug", debug_assertions))]
        self.stack.push(ty.clone());
        self.write_fields(layout.fields(), data)?;
        #[cfg(all(feature = "debug", debug_assertions))]
        self.stack.pop();
        Ok(())
    }

    fn write_fields(&mut self, fields: &[Arc<FieldInfo>], data: &ObjectData) -> Result<(), SerializeError> {
        self.write_len(fields.len())?;
        for (field, value) in fields.iter().zip(data.values()) {
            self.write_value(field.ty(), value)?;
        }
        Ok(())
    }

    fn write_ref(&mut self, object: ObjectId) -> Result<(), SerializeError> {
        let (id, is_new) = self
            .tracker
            .id_for(object)
            .ok_or(SerializeError::TooManyObjects)?;
        if !is_new {
            self.writer.write_tag(Tag::BackRef)?;
            self.writer.write_u32(id.get())?;
            return Ok(());
        }

        let heap = self.heap;
        let instance = heap.get(object).ok_or(SerializeError::DanglingObject(object))?;
        let ty = instance.ty();
        let shape = self.catalog.shape_of(ty)?;
        log::trace!("record {id} `{ty}`");

        let tag = match (&*shape, instance.data()) {
            (TypeShape::Array(_), InstanceData::Array(_)) => Tag::Array,
            (TypeShape::Sequence(_), InstanceData::Sequence(_)) => Tag::Sequence,
            (TypeShape::Mapping(..), InstanceData::Mapping(_)) => Tag::Mapping,
            (TypeShape::Object(layout), InstanceData::Object(data))
                if !layout.is_value_type() && data.len() == layout.len() =>
            {
                Tag::Object
            }
            _ => {
                return Err(SerializeError::ShapeMismatch {
                    ty: ty.clone(),
                    expected: shape.name(),
                });
            }
        };
        self.writer.write_tag(tag)?;
        self.writer.write_u32(id.get())?;
        self.write_str(ty.as_str())?;

        #[cfg(all(feature = "debug", debug_assertions))]
        self.stack.push(ty.clone());
        match (&*shape, instance.data()) {
            (TypeShape::Array(elem), InstanceData::Array(items))
            | (TypeShape::Sequence(elem), InstanceData::Sequence(items)) => {
                self.write_len(items.len())?;
                for item in items {
                    self.write_value(elem.path(), item)?;
                }
            }
            (TypeShape::Mapping(key_ty, value_ty), InstanceData::Mapping(map)) => {
                self.write_len(map.len())?;
                for (key, value) in map.iter() {
                    self.write_value(key_ty.path(), key)?;
                    self.write_value(value_ty.path(), value)?;
                }
            }
            (TypeShape::Object(layout), InstanceData::Object(data)) => {
                self.write_fields(layout.fields(), data)?;
            }
            _ => {}
        }
        #[cfg(all(feature = "debug", debug_assertions))]
        self.stack.pop();
        Ok(())
    }
}
