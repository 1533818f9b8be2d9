//! Provide the dynamic object model.
//!
//! ## Menu
//!
//! - [`Value`]: A slot of the graph, inline values or a reference.
//! - [`EnumValue`]: A raw enum value tagged with its enum type.
//! - [`MemberHandle`]: A shared handle to a declared method or field.
//! - [`ObjectData`]: The field slots of an object or a value-type struct.
//! - [`MapData`]: Insertion-ordered mapping entries.
//! - [`Heap`]: The arena owning reference-typed [`Instance`]s, keyed by [`ObjectId`].
//! - [`Graph`]: A root value and its heap.

// -----------------------------------------------------------------------------
// Modules

mod heap;
mod map_data;
mod member;
mod object_data;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use heap::{Graph, Heap, Instance, InstanceData, ObjectId};
pub use map_data::MapData;
pub use member::MemberHandle;
pub use object_data::ObjectData;
pub use value::{EnumValue, Value};
