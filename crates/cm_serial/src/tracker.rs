//! Identity tracking for one session.
//!
//! Reference ids are assigned in strict first-encounter order starting at
//! 1. Id 0 is never assigned, the null tag stands for null.

use alloc::vec::Vec;
use core::fmt;
use core::num::NonZeroU32;

use cm_reflect::ops::ObjectId;
use slotmap::SecondaryMap;

use crate::MalformedStream;

// -----------------------------------------------------------------------------
// ReferenceId

/// The per-session id of a reference-typed instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId(NonZeroU32);

impl ReferenceId {
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for 0.
    #[inline]
    pub const fn new(id: u32) -> Option<Self> {
        match NonZeroU32::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// -----------------------------------------------------------------------------
// EncodeTracker

/// Assigns reference ids to heap instances as the encoder meets them.
///
/// Identity is [`ObjectId`] equality, two instances with equal contents
/// still get distinct ids.
#[derive(Debug, Default)]
pub struct EncodeTracker {
    ids: SecondaryMap<ObjectId, ReferenceId>,
    next: u32,
}

impl EncodeTracker {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `object` and whether this is its first encounter.
    ///
    /// Returns `None` once every `u32` id has been handed out.
    pub fn id_for(&mut self, object: ObjectId) -> Option<(ReferenceId, bool)> {
        if let Some(id) = self.ids.get(object) {
            return Some((*id, false));
        }
        let id = ReferenceId::new(self.next.checked_add(1)?)?;
        self.next = id.get();
        self.ids.insert(object, id);
        Some((id, true))
    }

    /// Number of ids handed out.
    #[inline]
    pub fn len(&self) -> usize {
        self.next as usize
    }
}

// -----------------------------------------------------------------------------
// DecodeTracker

/// Maps reference ids back to the placeholder instances the decoder allocated.
#[derive(Debug, Default)]
pub struct DecodeTracker {
    objects: Vec<ObjectId>,
}

impl DecodeTracker {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next forward definition must carry.
    #[inline]
    pub fn next_id(&self) -> u32 {
        self.objects.len() as u32 + 1
    }

    /// Registers the placeholder of a forward definition.
    ///
    /// Fails unless `id` is exactly [`next_id`](Self::next_id).
    pub fn register(&mut self, id: u32, object: ObjectId) -> Result<ReferenceId, MalformedStream> {
        let expected = self.next_id();
        match ReferenceId::new(id) {
            Some(reference) if id == expected => {
                self.objects.push(object);
                Ok(reference)
            }
            _ => Err(MalformedStream::OutOfOrderId {
                expected,
                found: id,
            }),
        }
    }

    /// Resolves a back-reference to an already registered placeholder,
    /// populated or not.
    pub fn placeholder_for(&self, id: u32) -> Result<ObjectId, MalformedStream> {
        (id as usize)
            .checked_sub(1)
            .and_then(|index| self.objects.get(index))
            .copied()
            .ok_or(MalformedStream::UndefinedReference(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use cm_reflect::ops::{Heap, Instance, InstanceData};

    use super::{DecodeTracker, EncodeTracker};
    use crate::MalformedStream;

    fn two_objects() -> (Heap, [cm_reflect::ops::ObjectId; 2]) {
        let mut heap = Heap::new();
        let mut alloc = || heap.alloc(Instance::new("List<i32>", InstanceData::Sequence(Vec::new())));
        let ids = [alloc(), alloc()];
        (heap, ids)
    }

    #[test]
    fn identity_not_equality() {
        let (_heap, [a, b]) = two_objects();
        let mut tracker = EncodeTracker::new();

        let (id_a, new_a) = tracker.id_for(a).unwrap();
        let (id_b, new_b) = tracker.id_for(b).unwrap();
        let (again, new_again) = tracker.id_for(a).unwrap();

        assert_eq!((id_a.get(), new_a), (1, true));
        assert_eq!((id_b.get(), new_b), (2, true));
        assert_eq!((again, new_again), (id_a, false));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn strict_sequential_registration() {
        let (_heap, [a, b]) = two_objects();
        let mut tracker = DecodeTracker::new();

        assert_eq!(
            tracker.register(2, a),
            Err(MalformedStream::OutOfOrderId { expected: 1, found: 2 })
        );
        assert_eq!(tracker.register(1, a).unwrap().get(), 1);
        assert_eq!(
            tracker.register(0, b),
            Err(MalformedStream::OutOfOrderId { expected: 2, found: 0 })
        );
        assert_eq!(tracker.register(2, b).unwrap().get(), 2);

        assert_eq!(tracker.placeholder_for(1), Ok(a));
        assert_eq!(tracker.placeholder_for(2), Ok(b));
        assert_eq!(tracker.placeholder_for(0), Err(MalformedStream::UndefinedReference(0)));
        assert_eq!(tracker.placeholder_for(3), Err(MalformedStream::UndefinedReference(3)));
    }
}
