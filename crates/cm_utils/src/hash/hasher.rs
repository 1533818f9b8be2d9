//! Provide `FixedHasher`.
//!
//! `FixedHasher` based on `foldhash` crate,
//! Provide stable hash results through a fixed hash seed.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x43_52_59_4D_4F_4E_4F_31);

/// A fixed hasher provided hash results that only related on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`] .
///
/// Which can be created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed Hash State based upon a random but fixed seed.
///
/// Type registries and shape caches are keyed by type names, so a fixed
/// seed keeps their behaviour reproducible from run to run.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use cm_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("Vec<i32>");
/// let b = FixedHashState.hash_one("Vec<i32>");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::FixedHashState;
    use crate::hash::HashMap;

    #[test]
    fn fixed_state_is_deterministic() {
        use core::hash::BuildHasher;
        assert_eq!(FixedHashState.hash_one(42_u32), FixedHashState.hash_one(42_u32));
        assert_ne!(FixedHashState.hash_one(1_u32), FixedHashState.hash_one(2_u32));
    }

    #[test]
    fn map_alias_uses_fixed_state() {
        let mut map: HashMap<&str, i32> = HashMap::default();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.len(), 2);
    }
}
