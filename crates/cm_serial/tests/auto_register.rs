#![cfg(feature = "auto_register")]

mod common;

use cm_reflect::catalog::TypeCatalog;
use cm_reflect::info::ObjectInfo;
use cm_reflect::ops::{Heap, Value};
use cm_reflect::registry::TypeRegistry;

use common::round_trip;

fn register_vec2(registry: &mut TypeRegistry) {
    registry.register(ObjectInfo::value_type("Vec2").with_field("X", "f32").with_field("Y", "f32"));
}

cm_reflect::auto_register!(register_vec2);

#[test]
fn submitted_types_are_registered() {
    let mut registry = TypeRegistry::empty();
    assert!(registry.auto_register());
    assert!(registry.contains("Vec2"));
    assert!(registry.contains("Object"));

    let catalog = TypeCatalog::new(registry);
    let mut vec2 = catalog.new_struct(&"Vec2".into()).unwrap();
    vec2.set("Y", 0.5f32).unwrap();

    let graph = round_trip(&catalog, &Heap::new(), &Value::from(vec2.clone()));
    assert_eq!(graph.root.as_struct(), Some(&vec2));
}
