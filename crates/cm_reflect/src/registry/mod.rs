//! Provide the type registry, the table of every serializable type.
//!
//! ## Menu
//!
//! - [`TypeRegistry`]: A container for storing and querying [`TypeInfo`]s by name.
//! - [`AutoRegistration`]: A registration function collected at link time.
//! - [`auto_register!`]: Submits an [`AutoRegistration`].
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`] .
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`auto_register!`]: crate::auto_register
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "auto_register")]
mod auto_register;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use auto_register::AutoRegistration;
pub use type_registry::TypeRegistry;
