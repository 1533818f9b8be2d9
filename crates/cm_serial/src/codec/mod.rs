//! The byte-level encoding.
//!
//! ## Menu
//!
//! - [`Tag`]: The one-byte shape tag of every encoded value.
//! - [`StreamWriter`]: Writes tags, little-endian scalars and length-prefixed text.
//! - [`StreamReader`]: The checked inverse of `StreamWriter`.
//!
//! ## Layout
//!
//! ```text
//! value    := Null
//!           | BackRef id
//!           | <primitive tag> scalar
//!           | Text str
//!           | Enum str <primitive tag> scalar
//!           | Struct str count value*
//!           | ReflectionHandle str str kind
//!           | (Array | Sequence) id str count value*
//!           | Mapping id str count (value value)*
//!           | Object id str count value*
//! str      := u32 utf8-bytes
//! id count := u32
//! kind     := 0 (method) | 1 (field)
//! ```

// -----------------------------------------------------------------------------
// Modules

mod reader;
mod tag;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use reader::StreamReader;
pub use tag::Tag;
pub use writer::StreamWriter;
