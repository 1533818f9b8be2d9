use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{PoisonError, RwLock};

use cm_utils::hash::{HashMap, HashSet};

use crate::ReflectError;
use crate::catalog::{ElementType, ObjectLayout, TypeShape};
use crate::info::{ContainerKind, MemberKind, PrimitiveKind, TypeFlags, TypeInfo, TypeName};
use crate::info::{FIELD_INFO, METHOD_INFO, OBJECT, TEXT, TypePath};
use crate::info::{ObjectInfo, Primitive};
use crate::ops::{EnumValue, Heap, Instance, InstanceData, MapData, MemberHandle, ObjectData};
use crate::ops::Value;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// TypeCatalog

/// A frozen [`TypeRegistry`] plus a cache of classified shapes.
///
/// The catalog answers every type question the serializer asks: the
/// [shape](TypeCatalog::shape_of) of a type name, the ordered
/// [field layout](TypeCatalog::fields_of) of an object type, whether a
/// value is [assignable](TypeCatalog::accepts) to a declared type, how
/// to [instantiate](TypeCatalog::instantiate) an empty instance, and how
/// to [resolve](TypeCatalog::resolve_member) a member handle by name.
///
/// The cache is filled lazily. It is guarded by a [`RwLock`], so one
/// catalog can be shared by concurrent sessions.
///
/// # Classification
///
/// The first matching rule wins:
///
/// 1. a primitive name (`i32`, `bool`, ...) is [`TypeShape::Primitive`];
/// 2. `String` is [`TypeShape::Text`];
/// 3. a registered [`EnumInfo`] is [`TypeShape::Enum`];
/// 4. a name ending in `[]` is [`TypeShape::Array`];
/// 5. an instantiation of a sequence definition is [`TypeShape::Sequence`];
/// 6. an instantiation of a mapping definition is [`TypeShape::Mapping`];
/// 7. `MethodInfo` and `FieldInfo` are [`TypeShape::ReflectionHandle`];
/// 8. a registered object or interface is [`TypeShape::Object`].
///
/// Opaque types fail with [`ReflectError::Unsupported`], unregistered
/// names with [`ReflectError::UnknownType`].
///
/// [`EnumInfo`]: crate::info::EnumInfo
pub struct TypeCatalog {
    registry: TypeRegistry,
    shapes: RwLock<HashMap<TypePath, Arc<TypeShape>>>,
}

impl TypeCatalog {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            registry,
            shapes: RwLock::new(HashMap::default()),
        }
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Returns the cached shape of `path`, classifying it on first use.
    pub fn shape_of(&self, path: &TypePath) -> Result<Arc<TypeShape>, ReflectError> {
        if let Some(shape) = self.cached(path) {
            return Ok(shape);
        }
        // Computed without holding the lock, element shapes recurse into `shape_of`.
        let shape = Arc::new(self.classify(path)?);
        log::trace!("classified `{path}` as {shape}");
        Ok(self
            .shapes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(path.clone())
            .or_insert(shape)
            .clone())
    }

    #[inline(never)]
    fn cached(&self, path: &TypePath) -> Option<Arc<TypeShape>> {
        self.shapes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Returns the flattened field layout of an object type.
    pub fn fields_of(&self, path: &TypePath) -> Result<Arc<ObjectLayout>, ReflectError> {
        match &*self.shape_of(path)? {
            TypeShape::Object(layout) => Ok(layout.clone()),
            _ => Err(ReflectError::ShapeMismatch {
                path: path.clone(),
                expected: "an object type",
            }),
        }
    }

    fn classify(&self, path: &TypePath) -> Result<TypeShape, ReflectError> {
        let name = path.parse()?;
        let registered = self.registry.get(path.as_str());

        if name.is_plain() {
            if let Some(kind) = PrimitiveKind::from_name(name.ident) {
                return Ok(TypeShape::Primitive(kind));
            }
            if name.ident == TEXT {
                return Ok(TypeShape::Text);
            }
        }

        if let Some(TypeInfo::Enum(info)) = registered.map(|info| &**info) {
            if !info.underlying().is_integer() {
                return Err(ReflectError::ShapeMismatch {
                    path: path.clone(),
                    expected: "an enum with an integer underlying type",
                });
            }
            return Ok(TypeShape::Enum {
                path: path.clone(),
                underlying: info.underlying(),
            });
        }

        if let Some(element) = name.element() {
            return Ok(TypeShape::Array(self.element(&element)?));
        }

        if !name.args.is_empty() && registered.is_none() {
            return self.classify_generic(path, &name);
        }

        if name.is_plain() {
            match name.ident {
                METHOD_INFO => return Ok(TypeShape::ReflectionHandle(MemberKind::Method)),
                FIELD_INFO => return Ok(TypeShape::ReflectionHandle(MemberKind::Field)),
                _ => {}
            }
        }

        match registered.map(|info| &**info) {
            Some(TypeInfo::Object(_) | TypeInfo::Interface(_)) => {
                Ok(TypeShape::Object(Arc::new(self.layout(path)?)))
            }
            Some(TypeInfo::Opaque(_)) => Err(ReflectError::Unsupported(path.clone())),
            Some(TypeInfo::Generic(info)) => Err(ReflectError::GenericArity {
                path: path.clone(),
                expected: info.kind().arity(),
            }),
            Some(TypeInfo::Enum(_)) | None => Err(ReflectError::UnknownType(path.clone())),
        }
    }

    fn classify_generic(&self, path: &TypePath, name: &TypeName<'_>) -> Result<TypeShape, ReflectError> {
        let definition = match self.registry.get(name.ident).map(|info| &**info) {
            Some(TypeInfo::Generic(info)) => info,
            Some(TypeInfo::Opaque(_)) => return Err(ReflectError::Unsupported(path.clone())),
            _ => return Err(ReflectError::UnknownType(path.clone())),
        };
        let kind = definition.kind();
        if name.args.len() != kind.arity() {
            return Err(ReflectError::GenericArity {
                path: path.clone(),
                expected: kind.arity(),
            });
        }
        match kind {
            ContainerKind::Sequence => Ok(TypeShape::Sequence(self.element(&name.args[0])?)),
            ContainerKind::Mapping => Ok(TypeShape::Mapping(
                self.element(&name.args[0])?,
                self.element(&name.args[1])?,
            )),
        }
    }

    fn element(&self, name: &TypeName<'_>) -> Result<ElementType, ReflectError> {
        let path = name.to_path();
        let shape = self.shape_of(&path)?;
        Ok(ElementType::new(path, shape))
    }

    fn layout(&self, path: &TypePath) -> Result<ObjectLayout, ReflectError> {
        let chain = self.chain_of(path)?;
        let mut supertypes = HashSet::default();
        let mut fields = Vec::new();
        let mut flags = TypeFlags::empty();

        match self.registry.get(path.as_str()).map(|info| &**info) {
            Some(TypeInfo::Interface(info)) => {
                flags |= TypeFlags::ABSTRACT;
                for parent in info.extends() {
                    self.collect_interfaces(parent, &mut supertypes)?;
                }
            }
            _ => {
                // Most-base-first.
                for info in chain.iter().rev() {
                    fields.extend(info.fields().iter().filter(|f| !f.is_static()).cloned());
                    for interface in info.interfaces() {
                        self.collect_interfaces(interface, &mut supertypes)?;
                    }
                }
                for info in chain.iter().skip(1) {
                    supertypes.insert(info.path().clone());
                }
                if let Some(info) = chain.first() {
                    flags = info.flags();
                }
            }
        }

        if path != OBJECT {
            supertypes.insert(TypePath::from(OBJECT));
        }

        Ok(ObjectLayout::new(
            path.clone(),
            flags,
            fields.into_boxed_slice(),
            supertypes,
        ))
    }

    /// Returns the object descriptors from `path` up to the root, most-derived first.
    ///
    /// Interfaces have an empty chain.
    fn chain_of(&self, path: &TypePath) -> Result<Vec<&ObjectInfo>, ReflectError> {
        let mut chain: Vec<&ObjectInfo> = Vec::new();
        let mut current = Some(path);
        while let Some(ty) = current {
            let info = match self.registry.get(ty.as_str()).map(|info| &**info) {
                Some(TypeInfo::Object(info)) => info,
                Some(TypeInfo::Interface(_)) if ty == path => break,
                Some(_) => {
                    return Err(ReflectError::ShapeMismatch {
                        path: ty.clone(),
                        expected: "an object type",
                    });
                }
                None => return Err(ReflectError::UnknownType(ty.clone())),
            };
            if chain.iter().any(|seen| seen.path() == info.path()) {
                return Err(ReflectError::InheritanceCycle(path.clone()));
            }
            chain.push(info);
            current = info.base();
        }
        Ok(chain)
    }

    fn collect_interfaces(
        &self,
        path: &TypePath,
        out: &mut HashSet<TypePath>,
    ) -> Result<(), ReflectError> {
        if out.contains(path) {
            return Ok(());
        }
        match self.registry.get(path.as_str()).map(|info| &**info) {
            Some(TypeInfo::Interface(info)) => {
                out.insert(path.clone());
                for parent in info.extends() {
                    self.collect_interfaces(parent, out)?;
                }
                Ok(())
            }
            Some(_) => Err(ReflectError::ShapeMismatch {
                path: path.clone(),
                expected: "an interface",
            }),
            None => Err(ReflectError::UnknownType(path.clone())),
        }
    }

    // -------------------------------------------------------------------------
    // Values

    /// Whether `value` may be stored in a slot declared as `declared`.
    ///
    /// - everything, null included, is assignable to `Object`;
    /// - null is assignable to every type except primitives, enums and value types;
    /// - an object is assignable to its own type, its bases and its interfaces;
    /// - other values must match the declared shape exactly.
    ///
    /// References missing from `heap` are never assignable.
    pub fn accepts(&self, declared: &TypePath, value: &Value, heap: &Heap) -> Result<bool, ReflectError> {
        if declared == OBJECT {
            return Ok(match value {
                Value::Ref(id) => heap.contains(*id),
                _ => true,
            });
        }
        let shape = self.shape_of(declared)?;
        Ok(match value {
            Value::Null => !shape.is_value_type(),
            Value::Primitive(p) => matches!(*shape, TypeShape::Primitive(kind) if kind == p.kind()),
            Value::Text(_) => matches!(*shape, TypeShape::Text),
            Value::Enum(e) => matches!(&*shape, TypeShape::Enum { path, .. } if path == e.ty()),
            Value::Struct(data) => data.layout().is_subtype_of(declared),
            Value::Member(handle) => {
                matches!(*shape, TypeShape::ReflectionHandle(kind) if kind == handle.kind())
            }
            Value::Ref(id) => match heap.get(*id) {
                None => false,
                Some(instance) if instance.ty() == declared => true,
                Some(instance) => match &*self.shape_of(instance.ty())? {
                    TypeShape::Object(layout) => layout.is_subtype_of(declared),
                    _ => false,
                },
            },
        })
    }

    /// Creates an empty instance of a reference type.
    ///
    /// Containers start empty. Object fields hold the default value of
    /// their declared type; no user constructor is involved.
    ///
    /// # Errors
    ///
    /// - [`ReflectError::AbstractType`] for abstract classes, interfaces and `Object`.
    /// - [`ReflectError::ShapeMismatch`] for shapes stored inline (primitives, structs, ...).
    pub fn instantiate(&self, path: &TypePath) -> Result<Instance, ReflectError> {
        let data = match &*self.shape_of(path)? {
            TypeShape::Array(_) => InstanceData::Array(Vec::new()),
            TypeShape::Sequence(_) => InstanceData::Sequence(Vec::new()),
            TypeShape::Mapping(..) => InstanceData::Mapping(MapData::new()),
            TypeShape::Object(layout) if layout.is_abstract() => {
                return Err(ReflectError::AbstractType(path.clone()));
            }
            TypeShape::Object(layout) if !layout.is_value_type() => {
                InstanceData::Object(self.default_object(layout, &mut Vec::new())?)
            }
            _ => {
                return Err(ReflectError::ShapeMismatch {
                    path: path.clone(),
                    expected: "a reference type",
                });
            }
        };
        Ok(Instance::new(path.clone(), data))
    }

    /// Returns the default value of a slot declared as `path`.
    ///
    /// Zero for primitives and enums, a default struct for value types,
    /// null for everything else (`String` included).
    pub fn default_value(&self, path: &TypePath) -> Result<Value, ReflectError> {
        self.default_value_guarded(path, &mut Vec::new())
    }

    /// Creates a value-type struct with every field at its default.
    pub fn new_struct(&self, path: &TypePath) -> Result<ObjectData, ReflectError> {
        let layout = self.fields_of(path)?;
        if !layout.is_value_type() {
            return Err(ReflectError::ShapeMismatch {
                path: path.clone(),
                expected: "a value type",
            });
        }
        self.default_object(&layout, &mut Vec::new())
    }

    fn default_value_guarded(
        &self,
        path: &TypePath,
        stack: &mut Vec<TypePath>,
    ) -> Result<Value, ReflectError> {
        Ok(match &*self.shape_of(path)? {
            TypeShape::Primitive(kind) => Value::Primitive(kind.default_value()),
            TypeShape::Enum { path, underlying } => {
                Value::Enum(EnumValue::new(path, underlying.default_value()))
            }
            TypeShape::Object(layout) if layout.is_value_type() => {
                Value::Struct(self.default_object(layout, stack)?)
            }
            _ => Value::Null,
        })
    }

    fn default_object(
        &self,
        layout: &Arc<ObjectLayout>,
        stack: &mut Vec<TypePath>,
    ) -> Result<ObjectData, ReflectError> {
        if stack.contains(layout.path()) {
            return Err(ReflectError::RecursiveValueType(layout.path().clone()));
        }
        stack.push(layout.path().clone());
        let values = layout
            .fields()
            .iter()
            .map(|field| self.default_value_guarded(field.ty(), stack))
            .collect::<Result<Box<[Value]>, _>>()?;
        stack.pop();
        Ok(ObjectData::new(layout.clone(), values))
    }

    /// Resolves a variant of a registered enum by name.
    pub fn enum_value(&self, path: &TypePath, variant: &str) -> Result<EnumValue, ReflectError> {
        let info = match self.registry.get(path.as_str()).map(|info| &**info) {
            Some(TypeInfo::Enum(info)) => info,
            Some(_) => {
                return Err(ReflectError::ShapeMismatch {
                    path: path.clone(),
                    expected: "an enum",
                });
            }
            None => return Err(ReflectError::UnknownType(path.clone())),
        };
        info.variant(variant)
            .and_then(|raw| Primitive::from_integer(info.underlying(), raw))
            .map(|value| EnumValue::new(path, value))
            .ok_or_else(|| ReflectError::UnknownVariant {
                ty: path.clone(),
                variant: String::from(variant),
            })
    }

    // -------------------------------------------------------------------------
    // Members

    /// Finds a method visible on `ty`, searching the most-derived type first,
    /// then the implemented interfaces.
    pub fn find_method(&self, ty: &TypePath, name: &str) -> Option<MemberHandle> {
        let chain = self.chain_of(ty).ok()?;
        if let Some(method) = chain.iter().find_map(|info| info.method(name)) {
            return Some(MemberHandle::Method(method.clone()));
        }
        let layout = self.fields_of(ty).ok()?;
        core::iter::once(ty).chain(layout.supertypes()).find_map(|path| {
            let info = self.registry.get(path.as_str())?.as_interface().ok()?;
            info.method(name).cloned().map(MemberHandle::Method)
        })
    }

    /// Finds a field visible on `ty`, statics included, searching the
    /// most-derived type first.
    pub fn find_field(&self, ty: &TypePath, name: &str) -> Option<MemberHandle> {
        let chain = self.chain_of(ty).ok()?;
        chain
            .iter()
            .find_map(|info| info.field(name))
            .map(|field| MemberHandle::Field(field.clone()))
    }

    /// Resolves a member declared directly by `declaring`.
    ///
    /// This is how deserialized reflection handles are re-bound, by name,
    /// to the live descriptors.
    pub fn resolve_member(
        &self,
        declaring: &TypePath,
        name: &str,
        kind: MemberKind,
    ) -> Result<MemberHandle, ReflectError> {
        let found = match self.registry.get(declaring.as_str()).map(|info| &**info) {
            Some(TypeInfo::Object(info)) => match kind {
                MemberKind::Method => info.method(name).cloned().map(MemberHandle::Method),
                MemberKind::Field => info.field(name).cloned().map(MemberHandle::Field),
            },
            Some(TypeInfo::Interface(info)) => match kind {
                MemberKind::Method => info.method(name).cloned().map(MemberHandle::Method),
                MemberKind::Field => None,
            },
            _ => return Err(ReflectError::UnknownType(declaring.clone())),
        };
        found.ok_or_else(|| ReflectError::UnknownMember {
            ty: declaring.clone(),
            name: String::from(name),
            kind,
        })
    }
}

impl core::fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::TypeCatalog;
    use crate::ReflectError;
    use crate::catalog::TypeShape;
    use crate::info::{EnumInfo, InterfaceInfo, MemberKind, ObjectInfo, PrimitiveKind, TypePath};
    use crate::ops::{Heap, Value};
    use crate::registry::TypeRegistry;

    fn catalog() -> TypeCatalog {
        let mut registry = TypeRegistry::new();
        registry.register(EnumInfo::new("Mode").with_variant("Off", 0).with_variant("On", 1));
        registry.register(InterfaceInfo::new("Interface").with_method("PureVirtualMethod"));
        registry.register(InterfaceInfo::new("Named").with_extends("Interface"));
        registry.register(
            ObjectInfo::new("BaseClass")
                .with_abstract()
                .with_interface("Named")
                .with_field("BooleanProperty", "bool")
                .with_method("PureVirtualMethod"),
        );
        registry.register(
            ObjectInfo::new("Derived")
                .with_base("BaseClass")
                .with_field("StringProperty", "String")
                .with_static_field("Instances", "i32")
                .with_method("ToString"),
        );
        registry.register(
            ObjectInfo::value_type("Vec3")
                .with_field("X", "f32")
                .with_field("Y", "f32")
                .with_field("Z", "f32"),
        );
        registry.register(ObjectInfo::value_type("Knot").with_field("Inner", "Knot"));
        registry.register(ObjectInfo::new("Loop").with_base("Loop"));
        TypeCatalog::new(registry)
    }

    fn path(s: &str) -> TypePath {
        TypePath::from(s)
    }

    #[test]
    fn classification() {
        let catalog = catalog();
        let shape = |s: &str| catalog.shape_of(&path(s)).unwrap();

        assert!(matches!(*shape("u16"), TypeShape::Primitive(PrimitiveKind::U16)));
        assert!(matches!(*shape("String"), TypeShape::Text));
        assert!(matches!(*shape("Mode"), TypeShape::Enum { .. }));
        assert!(matches!(*shape("Mode[]"), TypeShape::Array(_)));
        assert!(matches!(*shape("List<String>"), TypeShape::Sequence(_)));
        assert!(matches!(*shape("Dictionary<i32, List<Derived>>"), TypeShape::Mapping(..)));
        assert!(matches!(*shape("MethodInfo"), TypeShape::ReflectionHandle(MemberKind::Method)));
        assert!(matches!(*shape("FieldInfo"), TypeShape::ReflectionHandle(MemberKind::Field)));
        assert!(matches!(*shape("Derived"), TypeShape::Object(_)));
        assert!(matches!(*shape("Interface"), TypeShape::Object(_)));

        match &*shape("i32[][]") {
            TypeShape::Array(elem) => {
                assert_eq!(elem.path().as_str(), "i32[]");
                assert!(matches!(**elem.shape(), TypeShape::Array(_)));
            }
            other => panic!("unexpected shape {other}"),
        }
    }

    #[test]
    fn shapes_are_cached() {
        let catalog = catalog();
        let a = catalog.shape_of(&path("Derived")).unwrap();
        let b = catalog.shape_of(&path("Derived")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn classification_errors() {
        let catalog = catalog();
        let err = |s: &str| catalog.shape_of(&path(s)).unwrap_err();

        assert_eq!(err("Delegate"), ReflectError::Unsupported(path("Delegate")));
        assert_eq!(err("List<Delegate>"), ReflectError::Unsupported(path("Delegate")));
        assert_eq!(err("Missing"), ReflectError::UnknownType(path("Missing")));
        assert_eq!(err("Loop"), ReflectError::InheritanceCycle(path("Loop")));
        assert!(matches!(err("Map<i32>"), ReflectError::GenericArity { expected: 2, .. }));
        assert!(matches!(err("List"), ReflectError::GenericArity { expected: 1, .. }));
        assert!(matches!(err("List<"), ReflectError::InvalidTypeName(_)));
    }

    #[test]
    fn layout_is_most_base_first() {
        let catalog = catalog();
        let layout = catalog.fields_of(&path("Derived")).unwrap();
        let names: Vec<_> = layout.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["BooleanProperty", "StringProperty"]);
        assert_eq!(layout.fields()[0].declaring().as_str(), "BaseClass");

        for super_ty in ["BaseClass", "Named", "Interface", "Object"] {
            assert!(layout.is_subtype_of(&path(super_ty)), "{super_ty}");
        }
        assert!(!layout.is_subtype_of(&path("Vec3")));
    }

    #[test]
    fn accepts_polymorphic_values() {
        let catalog = catalog();
        let mut heap = Heap::new();
        let derived = heap.alloc(catalog.instantiate(&path("Derived")).unwrap());
        let value = Value::Ref(derived);

        for declared in ["Derived", "BaseClass", "Interface", "Object"] {
            assert!(catalog.accepts(&path(declared), &value, &heap).unwrap(), "{declared}");
        }
        assert!(!catalog.accepts(&path("List<i32>"), &value, &heap).unwrap());
        assert!(catalog.accepts(&path("Derived"), &Value::Null, &heap).unwrap());
        assert!(!catalog.accepts(&path("i32"), &Value::Null, &heap).unwrap());
        assert!(!catalog.accepts(&path("i64"), &Value::from(1_i32), &heap).unwrap());
        assert!(catalog.accepts(&path("Object"), &Value::from(1_i32), &heap).unwrap());
    }

    #[test]
    fn instantiate_defaults() {
        let catalog = catalog();
        let instance = catalog.instantiate(&path("Derived")).unwrap();
        let object = instance.as_object().unwrap();
        assert_eq!(object.get("BooleanProperty"), Some(&Value::from(false)));
        assert_eq!(object.get("StringProperty"), Some(&Value::Null));
        assert_eq!(object.get("Instances"), None);

        assert_eq!(
            catalog.instantiate(&path("BaseClass")).unwrap_err(),
            ReflectError::AbstractType(path("BaseClass"))
        );
        assert!(catalog.instantiate(&path("Vec3")).is_err());
        assert!(catalog.instantiate(&path("List<i32>")).unwrap().as_list().unwrap().is_empty());

        let vec3 = catalog.new_struct(&path("Vec3")).unwrap();
        assert_eq!(vec3.get("Z"), Some(&Value::from(0.0_f32)));
        assert_eq!(
            catalog.default_value(&path("Knot")).unwrap_err(),
            ReflectError::RecursiveValueType(path("Knot"))
        );
    }

    #[test]
    fn member_lookup() {
        let catalog = catalog();
        let derived = path("Derived");

        let a = catalog.find_method(&derived, "PureVirtualMethod").unwrap();
        let b = catalog
            .resolve_member(&path("BaseClass"), "PureVirtualMethod", MemberKind::Method)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.declaring().as_str(), "BaseClass");

        let field = catalog.find_field(&derived, "Instances").unwrap();
        assert_eq!(field.kind(), MemberKind::Field);

        assert!(matches!(
            catalog.resolve_member(&derived, "Missing", MemberKind::Field),
            Err(ReflectError::UnknownMember { kind: MemberKind::Field, .. })
        ));
        assert!(catalog.find_method(&path("Vec3"), "Length").is_none());
    }

    #[test]
    fn enum_values() {
        let catalog = catalog();
        let on = catalog.enum_value(&path("Mode"), "On").unwrap();
        assert_eq!(on.as_integer(), Some(1));
        assert!(catalog.enum_value(&path("Mode"), "Dim").is_err());
    }

    const _STATIC_ASSERT_: () = {
        const fn is_send_sync<T: Send + Sync>() {}
        is_send_sync::<TypeCatalog>();
    };

    #[test]
    fn concurrent_classification_shares_one_shape() {
        let catalog = catalog();
        let target = path("Dictionary<i32, List<Derived>>");

        let shapes: Vec<Arc<TypeShape>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| catalog.shape_of(&target).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let cached = catalog.shape_of(&target).unwrap();
        assert!(shapes.iter().all(|shape| Arc::ptr_eq(shape, &cached)));
    }
}
