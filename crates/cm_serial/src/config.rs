//! Runtime settings of a serialization session.

// -----------------------------------------------------------------------------
// UnresolvedMember

/// What the decoder does with a reflection handle whose member no longer exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnresolvedMember {
    /// Abort the whole deserialization with
    /// [`DeserializeError::ReflectionResolution`](crate::DeserializeError::ReflectionResolution).
    #[default]
    Fail,
    /// Log a warning and store null in place of the handle.
    Substitute,
}

// -----------------------------------------------------------------------------
// SerialConfig

/// Limits and policies shared by encoding and decoding.
///
/// Encoding and decoding recurse once per nesting level, so the depth
/// limit also bounds stack use. Every value counts as a level, including
/// objects reached through a reference on first encounter: a linked chain
/// of `n` objects needs a depth of `n + 1`. Chains of
/// [`DEFAULT_MAX_DEPTH`](Self::DEFAULT_MAX_DEPTH) objects or more need
/// [`with_max_depth`](Self::with_max_depth) on both sides, and a thread
/// stack large enough for the chosen depth.
///
/// # Examples
///
/// ```
/// use cm_serial::{SerialConfig, UnresolvedMember};
///
/// let config = SerialConfig::new()
///     .with_max_depth(64)
///     .with_unresolved_member(UnresolvedMember::Substitute);
///
/// assert_eq!(config.max_depth(), 64);
/// assert_eq!(config.max_length(), SerialConfig::DEFAULT_MAX_LENGTH);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    max_depth: usize,
    max_length: u32,
    unresolved_member: UnresolvedMember,
}

impl Default for SerialConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerialConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    /// 16 MiB.
    pub const DEFAULT_MAX_LENGTH: u32 = 16 * 1024 * 1024;

    #[inline]
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_length: Self::DEFAULT_MAX_LENGTH,
            unresolved_member: UnresolvedMember::Fail,
        }
    }

    /// Bounds how deeply values may nest.
    ///
    /// Every value, inline or not, counts as one level. Back-references do
    /// not descend, so only the first path to an object adds depth.
    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Bounds every length and count prefix (text bytes, elements, pairs).
    #[inline]
    pub const fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    #[inline]
    pub const fn with_unresolved_member(mut self, policy: UnresolvedMember) -> Self {
        self.unresolved_member = policy;
        self
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub const fn max_length(&self) -> u32 {
        self.max_length
    }

    #[inline]
    pub const fn unresolved_member(&self) -> UnresolvedMember {
        self.unresolved_member
    }
}
