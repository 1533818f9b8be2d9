#![allow(dead_code)]

use std::io::Cursor;

use cm_reflect::catalog::TypeCatalog;
use cm_reflect::info::{EnumInfo, InterfaceInfo, ObjectInfo, TypePath};
use cm_reflect::ops::{Graph, Heap, ObjectId, Value};
use cm_reflect::registry::TypeRegistry;
use cm_serial::GraphSerializer;

pub const TEST_CLASS: &str = "TestClass";
pub const NESTED_CLASS: &str = "TestClass.NestedClass";
pub const NESTED_ENUM: &str = "TestClass.NestedEnum";
pub const MULTI_REF: &str = "Multiple_Reference_Test_Class";
pub const CONTAINING_REF: &str = "Multiple_Reference_Test_Class.Class_Containing_Reference";
pub const MEMBER_INFO_CLASS: &str = "Class_With_MemberInfo_Member";
pub const INHERIT_FROM_BASE: &str = "Class_Inherit_From_BaseClass";
pub const INHERIT_FROM_CLASS: &str = "Class_Inherit_From_Class";
pub const NODE: &str = "Node";

/// Registers the types the scenarios below are written against.
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();

    registry.register(
        EnumInfo::new(NESTED_ENUM)
            .with_variant("Nested_Quite", 0)
            .with_variant("Nested_NotQuite", 1),
    );
    registry.register(ObjectInfo::new(NESTED_CLASS).with_field("NestedEnum", NESTED_ENUM));
    registry.register(
        ObjectInfo::new(TEST_CLASS)
            .with_field("String", "String")
            .with_field("Integer", "i32")
            .with_field("Boolean", "bool")
            .with_field("NullString", "String")
            .with_field("nestedClass", NESTED_CLASS),
    );

    registry.register(ObjectInfo::new(CONTAINING_REF).with_field("TestClass", TEST_CLASS));
    registry.register(
        ObjectInfo::new(MULTI_REF)
            .with_field("ClassWithTestClassReference", CONTAINING_REF)
            .with_field("TestClassReference", TEST_CLASS)
            .with_field("TestClassSeperate", TEST_CLASS),
    );

    registry.register(
        ObjectInfo::new(MEMBER_INFO_CLASS)
            .with_method("Method")
            .with_field("MethodInfo", "MethodInfo")
            .with_field("FieldInfo", "FieldInfo")
            .with_field("booleanField", "bool"),
    );

    registry.register(InterfaceInfo::new("Interface").with_method("PureVirtualMethod"));
    registry.register(
        ObjectInfo::new("BaseClass")
            .with_abstract()
            .with_interface("Interface")
            .with_method("NonoverriddenMethod")
            .with_method("OverriddenMethod")
            .with_method("PureVirtualMethod")
            .with_field("BooleanProperty", "bool")
            .with_field("IntegerProperty", "i32"),
    );
    registry.register(
        ObjectInfo::new(INHERIT_FROM_BASE)
            .with_base("BaseClass")
            .with_method("OverriddenMethod")
            .with_field("StringProperty", "String"),
    );
    registry.register(
        ObjectInfo::new(INHERIT_FROM_CLASS)
            .with_base(INHERIT_FROM_BASE)
            .with_field("Vec3Property", "Vec3"),
    );
    registry.register(
        ObjectInfo::value_type("Vec3")
            .with_field("X", "f32")
            .with_field("Y", "f32")
            .with_field("Z", "f32"),
    );

    registry.register(
        ObjectInfo::new("Holder")
            .with_field("Item", "Interface")
            .with_field("Base", "BaseClass"),
    );
    registry.register(
        ObjectInfo::new(NODE)
            .with_field("Value", "i32")
            .with_field("Next", NODE),
    );

    registry
}

pub fn catalog() -> TypeCatalog {
    TypeCatalog::new(registry())
}

pub fn path(name: &str) -> TypePath {
    TypePath::from(name)
}

pub fn new_instance(catalog: &TypeCatalog, heap: &mut Heap, ty: &str) -> ObjectId {
    heap.alloc(catalog.instantiate(&path(ty)).unwrap())
}

pub fn set(heap: &mut Heap, object: ObjectId, field: &str, value: impl Into<Value>) {
    heap.object_mut(object).unwrap().set(field, value).unwrap();
}

pub fn get<'a>(heap: &'a Heap, object: ObjectId, field: &str) -> &'a Value {
    heap.object(object).unwrap().get(field).unwrap()
}

pub fn get_ref(heap: &Heap, object: ObjectId, field: &str) -> ObjectId {
    get(heap, object, field).as_object_id().unwrap()
}

/// `SetupTestClass`: a `TestClass` with a nested class holding `Nested_NotQuite`.
pub fn setup_test_class(catalog: &TypeCatalog, heap: &mut Heap) -> ObjectId {
    let nested = new_instance(catalog, heap, NESTED_CLASS);
    let not_quite = catalog.enum_value(&path(NESTED_ENUM), "Nested_NotQuite").unwrap();
    set(heap, nested, "NestedEnum", not_quite);

    let test_class = new_instance(catalog, heap, TEST_CLASS);
    set(heap, test_class, "Integer", 3);
    set(heap, test_class, "String", "testString");
    set(heap, test_class, "Boolean", true);
    set(heap, test_class, "nestedClass", nested);
    test_class
}

/// Asserts the fields `setup_test_class` stored.
pub fn assert_test_class(catalog: &TypeCatalog, heap: &Heap, test_class: ObjectId) {
    assert_eq!(heap.get(test_class).unwrap().ty(), &path(TEST_CLASS));
    assert_eq!(get(heap, test_class, "Boolean").get::<bool>(), Some(true));
    assert_eq!(get(heap, test_class, "Integer").get::<i32>(), Some(3));
    assert_eq!(get(heap, test_class, "String").as_text(), Some("testString"));
    assert!(get(heap, test_class, "NullString").is_null());

    let nested = get_ref(heap, test_class, "nestedClass");
    let expected = catalog.enum_value(&path(NESTED_ENUM), "Nested_NotQuite").unwrap();
    assert_eq!(get(heap, nested, "NestedEnum").as_enum(), Some(&expected));
}

/// Serializes through one serializer and deserializes through a fresh one,
/// over an in-memory stream.
pub fn round_trip(catalog: &TypeCatalog, heap: &Heap, root: &Value) -> Graph {
    let mut stream = Cursor::new(Vec::new());
    GraphSerializer::new(catalog)
        .serialize(&mut stream, heap, root)
        .unwrap();

    stream.set_position(0);
    GraphSerializer::new(catalog).deserialize(&mut stream).unwrap()
}

pub fn encode(catalog: &TypeCatalog, heap: &Heap, root: &Value) -> Vec<u8> {
    GraphSerializer::new(catalog)
        .serialize_to_vec(heap, root)
        .unwrap()
}
