//! Encoding side.
//!
//! - [`GraphEncoder`]: Walks a graph and writes it as a token stream.

// -----------------------------------------------------------------------------
// Modules

mod encoder;

// -----------------------------------------------------------------------------
// Exports

pub use encoder::GraphEncoder;
