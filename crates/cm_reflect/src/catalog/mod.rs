//! Provide the type catalog, which classifies type names into shapes.
//!
//! ## Menu
//!
//! - [`TypeCatalog`]: A frozen registry with a concurrent shape cache.
//! - [`TypeShape`]: The serialization-relevant classification of a type.
//! - [`ElementType`]: The declared type and shape of a container element.
//! - [`ObjectLayout`]: The ordered, inheritance-flattened fields of an object type.

// -----------------------------------------------------------------------------
// Modules

mod shape;
mod type_catalog;

// -----------------------------------------------------------------------------
// Exports

pub use shape::{ElementType, ObjectLayout, TypeShape};
pub use type_catalog::TypeCatalog;
