//! Cache Store Module
//!
//! Main cache engine combining the lookup table with the recency list.

use std::hash::Hash;

use tracing::debug;

use crate::cache::{Entry, LookupTable, RecencyList};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Fixed-capacity key/value cache evicting the least recently used entry.
///
/// `get`, `put` and eviction are all O(1). The cache performs no locking;
/// share it across threads behind an external lock.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key to handle index
    table: LookupTable<K>,
    /// Entries ordered by access time, owns all storage
    order: RecencyList<K, V>,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    ///
    /// Storage grows with the number of resident entries, not with `capacity`.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        debug!(capacity, "created LRU cache");
        Ok(Self {
            table: LookupTable::new(),
            order: RecencyList::new(),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves the value for `key` and marks it most recently used.
    ///
    /// A miss returns None and leaves the cache untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = self.table.lookup(key)?;
        self.order.move_to_front(handle);
        self.order.get(handle).map(|entry| &entry.value)
    }

    // == Put ==
    /// Stores `value` under `key` and marks it most recently used.
    ///
    /// An existing key is updated in place and never causes an eviction.
    /// A new key evicts exactly one entry first when the cache is full.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(handle) = self.table.lookup(&key) {
            if let Some(entry) = self.order.get_mut(handle) {
                entry.value = value;
            }
            self.order.move_to_front(handle);
            return;
        }

        if self.order.len() >= self.capacity {
            self.evict();
        }

        let handle = self.order.push_front(Entry::new(key.clone(), value));
        self.table.insert(key, handle);
    }

    // == Capacity ==
    /// Returns the maximum number of entries the cache can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops the least recently used entry from both structures.
    fn evict(&mut self) {
        let Some(evicted) = self.order.remove_back() else {
            unreachable!("recency list is empty while the cache is at capacity");
        };
        self.table.remove(evicted.key());

        debug!(
            capacity = self.capacity,
            len = self.order.len(),
            "evicted least recently used entry"
        );
    }

    /// Returns the current number of entries.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Verifies the structural invariants shared by the table and the list.
    #[cfg(test)]
    pub(crate) fn invariants_hold(&self) -> bool {
        if self.table.len() != self.order.len() || self.order.len() > self.capacity {
            return false;
        }
        if !self.order.links_are_consistent() {
            return false;
        }
        self.table.iter().all(|(key, handle)| {
            self.order
                .get(handle)
                .map(|entry| entry.key() == key)
                .unwrap_or(false)
        })
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<K> {
        self.order.iter().map(|entry| entry.key().clone()).collect()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> LruCache<String, String> {
        LruCache::new(capacity).unwrap()
    }

    fn key(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_cache_new() {
        let cache = cache(3);
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.len(), 0);
        assert!(cache.invariants_hold());
    }

    #[test]
    fn test_cache_zero_capacity_rejected() {
        let result: Result<LruCache<String, String>> = LruCache::new(0);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_cache_huge_capacity_allocates_lazily() {
        let mut cache: LruCache<String, String> = LruCache::new(usize::MAX).unwrap();
        assert_eq!(cache.capacity(), usize::MAX);

        cache.put(key("a"), key("1"));
        assert_eq!(cache.get(&key("a")), Some(&key("1")));
        assert!(cache.invariants_hold());
    }

    #[test]
    fn test_cache_put_and_get() {
        let mut cache = cache(3);

        cache.put(key("key1"), key("value1"));

        assert_eq!(cache.get(&key("key1")), Some(&key("value1")));
        assert_eq!(cache.len(), 1);
        assert!(cache.invariants_hold());
    }

    #[test]
    fn test_cache_get_missing() {
        let mut cache = cache(3);
        cache.put(key("a"), key("1"));
        cache.put(key("b"), key("2"));
        let before = cache.keys();

        assert_eq!(cache.get(&key("nonexistent")), None);
        assert_eq!(cache.keys(), before);
    }

    #[test]
    fn test_cache_overwrite() {
        let mut cache = cache(3);

        cache.put(key("key1"), key("value1"));
        cache.put(key("key1"), key("value2"));

        assert_eq!(cache.get(&key("key1")), Some(&key("value2")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_lru_eviction() {
        let mut cache = cache(3);

        cache.put(key("key1"), key("value1"));
        cache.put(key("key2"), key("value2"));
        cache.put(key("key3"), key("value3"));

        // Cache is full, adding key4 should evict key1 (oldest)
        cache.put(key("key4"), key("value4"));

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&key("key1")), None);
        assert!(cache.get(&key("key2")).is_some());
        assert!(cache.get(&key("key3")).is_some());
        assert!(cache.get(&key("key4")).is_some());
        assert!(cache.invariants_hold());
    }

    #[test]
    fn test_cache_get_promotes() {
        let mut cache = cache(2);

        cache.put(key("A"), key("a"));
        cache.put(key("B"), key("b"));
        cache.get(&key("A"));
        cache.put(key("C"), key("c"));

        assert_eq!(cache.get(&key("B")), None);
        assert_eq!(cache.get(&key("A")), Some(&key("a")));
        assert_eq!(cache.get(&key("C")), Some(&key("c")));
    }

    #[test]
    fn test_cache_update_promotes_without_evicting() {
        let mut cache = cache(2);

        cache.put(key("A"), key("a"));
        cache.put(key("B"), key("b"));
        cache.put(key("A"), key("a2"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.keys(), vec![key("A"), key("B")]);
        assert_eq!(cache.get(&key("A")), Some(&key("a2")));
        assert_eq!(cache.get(&key("B")), Some(&key("b")));

        // B was read last, so A is now the eviction candidate
        cache.put(key("C"), key("c"));
        assert_eq!(cache.get(&key("A")), None);
    }

    #[test]
    fn test_cache_capacity_one() {
        let mut cache = cache(1);

        cache.put(key("first"), key("1"));
        cache.put(key("second"), key("2"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("first")), None);
        assert_eq!(cache.get(&key("second")), Some(&key("2")));

        cache.put(key("second"), key("22"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key("second")), Some(&key("22")));
        assert!(cache.invariants_hold());
    }

    #[test]
    fn test_cache_back_to_back_evictions() {
        let mut cache = cache(2);

        for i in 0..10 {
            cache.put(format!("key{}", i), i.to_string());
            assert!(cache.len() <= 2);
            assert!(cache.invariants_hold());
        }

        assert_eq!(cache.keys(), vec![key("key9"), key("key8")]);
        for i in 0..8 {
            assert_eq!(cache.get(&format!("key{}", i)), None);
        }
    }

    #[test]
    fn test_cache_long_insert_stream() {
        let mut cache: LruCache<u32, u32> = LruCache::new(4).unwrap();

        for i in 0..1000 {
            cache.put(i, i * 2);
        }

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.keys(), vec![999, 998, 997, 996]);
        assert!(cache.invariants_hold());
    }
}
