//! Cache Entry Module
//!
//! Defines the key/value pair stored in the cache and the arena node that
//! links it into the recency list.

use crate::cache::Handle;

// == Cache Entry ==
/// A single key/value pair held by the cache.
///
/// The key is fixed for the lifetime of the entry; the value is replaced in
/// place when the same key is written again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    /// The stored value
    pub value: V,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a new entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the entry's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

// == Node ==
/// Arena slot payload: an entry plus its neighbours in recency order.
///
/// `prev` points towards the front (more recent), `next` towards the back.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) entry: Entry<K, V>,
    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn detached(entry: Entry<K, V>) -> Self {
        Self {
            entry,
            prev: None,
            next: None,
        }
    }
}
