//! Provide type descriptors.
//!
//! ## Menu
//!
//! - [`TypePath`]: A canonical type name, with a small grammar for generic
//!   instantiations (`Map<String, i32>`) and arrays (`i32[]`, `i32[][]`).
//! - [`TypeName`]: The parsed structure of a `TypePath`.
//! - [`PrimitiveKind`] / [`Primitive`]: Fixed-width scalar kinds and values.
//! - [`PrimitiveType`]: Rust scalar types mapped onto a `PrimitiveKind`.
//!
//! - [`TypeInfo`]: A enum representing registered descriptors, the inner is one of following:
//!     - [`ObjectInfo`]: Class-like or value types, with base, interfaces, fields and methods.
//!     - [`InterfaceInfo`]: Declared-only types implemented by objects.
//!     - [`EnumInfo`]: Enums, with an integer underlying kind and named variants.
//!     - [`GenericInfo`]: Generic sequence or mapping container definitions.
//!     - [`OpaqueInfo`]: Types that are known but refused by the serializer.
//!
//! - Member Info:
//!     - [`FieldInfo`]: A declared field, including name, declared type and declaring type.
//!     - [`MethodInfo`]: A declared method, only meaningful as a member handle target.
//!     - [`MemberKind`]: `Method` or `Field`.

// -----------------------------------------------------------------------------
// Modules

mod enum_info;
mod generic_info;
mod member_info;
mod object_info;
mod opaque_info;
mod primitive;
mod type_info;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use enum_info::EnumInfo;
pub use generic_info::{ContainerKind, GenericInfo};
pub use member_info::{FieldInfo, MemberKind, MethodInfo};
pub use object_info::{InterfaceInfo, ObjectInfo, TypeFlags};
pub use opaque_info::OpaqueInfo;
pub use primitive::{Primitive, PrimitiveKind, PrimitiveType};
pub use type_info::{TypeInfo, TypeKind, TypeKindError};
pub use type_path::{FIELD_INFO, METHOD_INFO, OBJECT, TEXT};
pub use type_path::{TypeName, TypePath};
