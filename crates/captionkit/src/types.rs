//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as a caption token id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the largest id in a vocabulary is less than `T::max()`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type CKHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> CKHashMap<K, V> {
            CKHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type CKHashSet<V> = ahash::AHashSet<V>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type CKHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> CKHashMap<K, V> {
            CKHashMap::with_capacity(capacity)
        }

        /// Type Alias for hash sets in this crate.
        pub type CKHashSet<V> = std::collections::HashSet<V>;
    }
}

/// Compile-time check that a type is [`Send`].
#[cfg(test)]
pub(crate) fn check_is_send<S: Send>(_: S) {}

/// Compile-time check that a type is [`Sync`].
#[cfg(test)]
pub(crate) fn check_is_sync<S: Sync>(_: S) {}
