#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

// -----------------------------------------------------------------------------
// Debug utils

#[cfg(all(feature = "debug", debug_assertions))]
mod type_stack;

// -----------------------------------------------------------------------------
// Modules

mod config;
mod error;
mod serializer;

pub mod codec;
pub mod de;
pub mod ser;
pub mod tracker;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use config::{SerialConfig, UnresolvedMember};
pub use error::{DeserializeError, MalformedStream, SerializeError};
pub use serializer::{GraphSerializer, deserialize, serialize};
