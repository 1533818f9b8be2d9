//! Re-export [`HashTable`] from [hashbrown] crate.
//!
//! A raw table stores no hasher, callers hash with [`FixedHashState`]
//! themselves.
//!
//! [`FixedHashState`]: crate::hash::FixedHashState

use hashbrown::hash_table as hb;

pub use hb::HashTable;

pub use hb::{Entry, OccupiedEntry, VacantEntry};
