use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;

use cm_utils::hash::{FixedHashState, HashTable};
use cm_utils::hash::hash_table::Entry;

use crate::ops::Value;

#[inline]
fn hash_key(key: &Value) -> u64 {
    FixedHashState.hash_one(key)
}

/// The entries of a mapping instance, in insertion order.
///
/// Keys are compared with [`Value`]'s `PartialEq`, so object keys compare
/// by identity. Inserting an existing key replaces its value in place and
/// keeps its original position.
///
/// Lookups go through a hash index over the entry positions, so inserting
/// and finding a key does not scan the entries. Removal still shifts the
/// later entries.
///
/// # Examples
///
/// ```
/// use cm_reflect::ops::{MapData, Value};
///
/// let mut map = MapData::new();
/// map.insert("test1", 1);
/// map.insert("test2", 2);
/// assert_eq!(map.insert("test1", 3), Some(Value::from(1)));
///
/// let keys: Vec<_> = map.keys().filter_map(Value::as_text).collect();
/// assert_eq!(keys, ["test1", "test2"]);
/// assert_eq!(map.get(&"test1".into()), Some(&Value::from(3)));
/// ```
#[derive(Clone, Default)]
pub struct MapData {
    entries: Vec<(Value, Value)>,
    // Positions into `entries`, hashed by key.
    index: HashTable<usize>,
}

impl MapData {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashTable::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
        }
    }

    fn find(&self, key: &Value) -> Option<usize> {
        let entries = &self.entries;
        self.index
            .find(hash_key(key), |&i| entries[i].0 == *key)
            .copied()
    }

    /// Inserts a pair, returning the replaced value if the key existed.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        let entries = &mut self.entries;
        let entry = self.index.entry(
            hash_key(&key),
            |&i| entries[i].0 == key,
            |&i| hash_key(&entries[i].0),
        );
        match entry {
            Entry::Occupied(occupied) => {
                let slot = &mut entries[*occupied.get()].1;
                Some(core::mem::replace(slot, value))
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entries.len());
                entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.find(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.find(key).map(|i| &mut self.entries[i].1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.find(key).is_some()
    }

    /// Removes a pair, shifting later entries to keep the order.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let entries = &self.entries;
        let (removed, _) = self
            .index
            .find_entry(hash_key(key), |&i| entries[i].0 == *key)
            .ok()?
            .remove();
        self.index
            .iter_mut()
            .filter(|i| **i > removed)
            .for_each(|i| *i -= 1);
        Some(self.entries.remove(removed).1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for MapData {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for MapData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
