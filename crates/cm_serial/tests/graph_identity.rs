//! Shared references, cycles, polymorphic slots and reflection handles.

mod common;

use cm_reflect::info::MemberKind;
use cm_reflect::ops::{Heap, Instance, InstanceData, Value};
use cm_serial::codec::Tag;
use cm_serial::{GraphSerializer, SerialConfig, SerializeError};

use common::*;

#[test]
fn shared_reference_stays_shared() {
    let catalog = catalog();
    let mut heap = Heap::new();

    let shared = setup_test_class(&catalog, &mut heap);
    let separate = setup_test_class(&catalog, &mut heap);
    let containing = new_instance(&catalog, &mut heap, CONTAINING_REF);
    set(&mut heap, containing, "TestClass", shared);

    let root = new_instance(&catalog, &mut heap, MULTI_REF);
    set(&mut heap, root, "ClassWithTestClassReference", containing);
    set(&mut heap, root, "TestClassReference", shared);
    set(&mut heap, root, "TestClassSeperate", separate);

    let graph = round_trip(&catalog, &heap, &Value::from(root));
    let heap = &graph.heap;
    let root = graph.root_id().unwrap();

    let containing = get_ref(heap, root, "ClassWithTestClassReference");
    let via_containing = get_ref(heap, containing, "TestClass");
    let direct = get_ref(heap, root, "TestClassReference");
    let separate = get_ref(heap, root, "TestClassSeperate");

    assert_eq!(via_containing, direct);
    assert_ne!(direct, separate);
    assert_test_class(&catalog, heap, direct);
    assert_test_class(&catalog, heap, separate);

    // root, containing, two test classes and their nested classes
    assert_eq!(heap.len(), 6);
}

#[test]
fn self_cycle() {
    let catalog = catalog();
    let mut heap = Heap::new();
    let list = heap.alloc(Instance::new("List<Object>", InstanceData::Sequence(Vec::new())));
    heap.list_mut(list).unwrap().push(Value::from(list));

    let graph = round_trip(&catalog, &heap, &Value::from(list));
    let list = graph.root_id().unwrap();
    let items = graph.heap.list(list).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].as_object_id(), Some(list));
}

#[test]
fn cycle_through_containers() {
    let catalog = catalog();
    let mut heap = Heap::new();
    let a = new_instance(&catalog, &mut heap, CONTAINING_REF);
    let b = new_instance(&catalog, &mut heap, TEST_CLASS);
    set(&mut heap, a, "TestClass", b);
    set(&mut heap, b, "String", "back");

    let holder = heap.alloc(Instance::new(
        "Object[]",
        InstanceData::Array(vec![Value::from(a), Value::from(b)]),
    ));
    let outer = heap.alloc(Instance::new(
        "List<Object>",
        InstanceData::Sequence(vec![Value::from(holder), Value::from(b)]),
    ));
    heap.list_mut(holder).unwrap().push(Value::from(outer));
    let unreachable = heap.alloc(Instance::new("List<Object>", InstanceData::Sequence(Vec::new())));
    assert!(heap.contains(unreachable));

    let graph = round_trip(&catalog, &heap, &Value::from(outer));
    let heap = &graph.heap;
    let outer = graph.root_id().unwrap();

    let items = heap.list(outer).unwrap();
    let holder = items[0].as_object_id().unwrap();
    let b = items[1].as_object_id().unwrap();

    let holder_items = heap.list(holder).unwrap();
    let a = holder_items[0].as_object_id().unwrap();
    assert_eq!(holder_items[1].as_object_id(), Some(b));
    assert_eq!(holder_items[2].as_object_id(), Some(outer));
    assert_eq!(get_ref(heap, a, "TestClass"), b);
    assert_eq!(get(heap, b, "String").as_text(), Some("back"));

    // outer, holder, a, b
    assert_eq!(heap.len(), 4);
}

#[test]
fn wire_layout_of_back_reference() {
    let catalog = catalog();
    let mut heap = Heap::new();
    let inner = heap.alloc(Instance::new("List<i32>", InstanceData::Sequence(Vec::new())));
    let outer = heap.alloc(Instance::new(
        "Object[]",
        InstanceData::Array(vec![Value::from(inner), Value::from(inner)]),
    ));

    let mut expected = vec![Tag::Array as u8, 1, 0, 0, 0, 8, 0, 0, 0];
    expected.extend_from_slice(b"Object[]");
    expected.extend_from_slice(&[2, 0, 0, 0]);
    expected.extend_from_slice(&[Tag::Sequence as u8, 2, 0, 0, 0, 9, 0, 0, 0]);
    expected.extend_from_slice(b"List<i32>");
    expected.extend_from_slice(&[0, 0, 0, 0]);
    expected.extend_from_slice(&[Tag::BackRef as u8, 2, 0, 0, 0]);

    assert_eq!(encode(&catalog, &heap, &Value::from(outer)), expected);
}

#[test]
fn interface_slot_keeps_concrete_type() {
    let catalog = catalog();
    let mut heap = Heap::new();

    let derived = new_instance(&catalog, &mut heap, INHERIT_FROM_CLASS);
    set(&mut heap, derived, "StringProperty", "derived");
    let base = new_instance(&catalog, &mut heap, INHERIT_FROM_BASE);
    set(&mut heap, base, "IntegerProperty", 7);

    let holder = new_instance(&catalog, &mut heap, "Holder");
    set(&mut heap, holder, "Item", derived);
    set(&mut heap, holder, "Base", base);

    let graph = round_trip(&catalog, &heap, &Value::from(holder));
    let heap = &graph.heap;
    let holder = graph.root_id().unwrap();

    let item = get_ref(heap, holder, "Item");
    assert_eq!(heap.get(item).unwrap().ty(), &path(INHERIT_FROM_CLASS));
    assert_eq!(get(heap, item, "StringProperty").as_text(), Some("derived"));
    assert!(get(heap, item, "Vec3Property").as_struct().is_some());

    let base = get_ref(heap, holder, "Base");
    assert_eq!(heap.get(base).unwrap().ty(), &path(INHERIT_FROM_BASE));
    assert_eq!(get(heap, base, "IntegerProperty").get::<i32>(), Some(7));
}

#[test]
fn member_handles_rebind_to_catalog() {
    let catalog = catalog();
    let ty = path(MEMBER_INFO_CLASS);
    let method = catalog.find_method(&ty, "Method").unwrap();
    let field = catalog.find_field(&ty, "booleanField").unwrap();

    let mut heap = Heap::new();
    let root = new_instance(&catalog, &mut heap, MEMBER_INFO_CLASS);
    set(&mut heap, root, "MethodInfo", method);
    set(&mut heap, root, "FieldInfo", field);
    set(&mut heap, root, "booleanField", true);

    let graph = round_trip(&catalog, &heap, &Value::from(root));
    let heap = &graph.heap;
    let root = graph.root_id().unwrap();

    let method = get(heap, root, "MethodInfo").as_member().unwrap();
    assert_eq!(method.kind(), MemberKind::Method);
    assert!(method.is_same(&catalog.find_method(&ty, "Method").unwrap()));

    let field = get(heap, root, "FieldInfo").as_member().unwrap();
    assert_eq!(field.kind(), MemberKind::Field);
    assert_eq!(field, &catalog.find_field(&ty, "booleanField").unwrap());
    assert_eq!(get(heap, root, "booleanField").get::<bool>(), Some(true));
}

#[test]
fn inherited_member_handle() {
    let catalog = catalog();
    let mut heap = Heap::new();
    let handle = catalog
        .find_method(&path(INHERIT_FROM_CLASS), "NonoverriddenMethod")
        .unwrap();
    assert_eq!(handle.declaring(), &path("BaseClass"));

    let array = heap.alloc(Instance::new(
        "Object[]",
        InstanceData::Array(vec![Value::from(handle.clone())]),
    ));
    let graph = round_trip(&catalog, &heap, &Value::from(array));
    let items = graph.heap.list(graph.root_id().unwrap()).unwrap();
    assert!(items[0].as_member().unwrap().is_same(&handle));
}

#[test]
fn long_chain_needs_raised_depth() {
    const LEN: usize = 300;
    let catalog = catalog();
    let mut heap = Heap::new();

    let nodes: Vec<_> = (0..LEN).map(|_| new_instance(&catalog, &mut heap, NODE)).collect();
    for (i, pair) in nodes.windows(2).enumerate() {
        set(&mut heap, pair[0], "Value", i as i32);
        set(&mut heap, pair[0], "Next", pair[1]);
    }
    set(&mut heap, nodes[LEN - 1], "Value", (LEN - 1) as i32);
    let root = Value::from(nodes[0]);

    // Each node adds a level, plus the null at the end.
    let err = GraphSerializer::new(&catalog)
        .serialize_to_vec(&heap, &root)
        .unwrap_err();
    assert!(matches!(err, SerializeError::DepthLimitExceeded(SerialConfig::DEFAULT_MAX_DEPTH)));

    let serializer = GraphSerializer::with_config(&catalog, SerialConfig::new().with_max_depth(2 * LEN));
    let bytes = serializer.serialize_to_vec(&heap, &root).unwrap();
    let graph = serializer.deserialize_from_slice(&bytes).unwrap();
    assert_eq!(graph.heap.len(), LEN);

    let mut node = graph.root_id();
    let mut seen = 0;
    while let Some(id) = node {
        assert_eq!(get(&graph.heap, id, "Value").get::<i32>(), Some(seen));
        node = get(&graph.heap, id, "Next").as_object_id();
        seen += 1;
    }
    assert_eq!(seen as usize, LEN);
}
