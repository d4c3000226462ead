//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with LRU eviction.
//!
//! The cache is split in two cooperating structures:
//! - `LookupTable`: key to handle index, O(1) existence checks
//! - `RecencyList`: arena-backed doubly-linked list, O(1) promotion and eviction

mod entry;
mod lookup;
mod recency;
mod store;


// Re-export public types
pub use entry::Entry;
pub use lookup::LookupTable;
pub use recency::{Handle, RecencyList};
pub use store::LruCache;
