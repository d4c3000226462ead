//! Lookup Table Module
//!
//! Maps keys to their handles in the recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::cache::Handle;

// == Lookup Table ==
/// Non-owning index from key to recency-list handle.
///
/// The table only locates nodes; the recency list owns them. Every handle
/// stored here must be removed in the same step its node is evicted.
#[derive(Debug)]
pub struct LookupTable<K> {
    map: HashMap<K, Handle, RandomState>,
}

impl<K> Default for LookupTable<K> {
    fn default() -> Self {
        Self {
            map: HashMap::default(),
        }
    }
}

impl<K: Hash + Eq> LookupTable<K> {
    // == Constructor ==
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Associates `key` with `handle`, returning the previous handle if any.
    pub fn insert(&mut self, key: K, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    // == Lookup ==
    /// Returns the handle for `key`, or None if the key is absent.
    pub fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    // == Remove ==
    /// Removes `key`, returning its handle if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    // == Contains ==
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    // == Length ==
    /// Returns the number of keys in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, Handle)> + '_ {
        self.map.iter().map(|(key, handle)| (key, *handle))
    }
}
