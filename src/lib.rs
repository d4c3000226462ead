//! Recency Cache - A fixed-capacity LRU cache
//!
//! Provides O(1) lookup, insertion, update and least-recently-used eviction,
//! plus a small HTTP front for serving a shared cache instance.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::LruCache;
pub use config::Config;
pub use error::{CacheError, Result};
