//! Decoding side.
//!
//! - [`GraphDecoder`]: Reads a token stream back into a heap and a root value.

// -----------------------------------------------------------------------------
// Modules

mod decoder;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::GraphDecoder;
