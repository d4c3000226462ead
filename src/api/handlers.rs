//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::Mutex;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::LruCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{GetResponse, HealthResponse, PutRequest, PutResponse};

/// Application state shared across all handlers.
///
/// The cache itself does no locking, so it sits behind a `Mutex` here.
/// Reads promote entries, so every cache call needs exclusive access.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache instance
    pub cache: Arc<Mutex<LruCache<String, String>>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: LruCache<String, String>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = LruCache::new(config.capacity)?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /put
///
/// Stores a key-value pair in the cache.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.lock().await;
    cache.put(req.key.clone(), req.value);

    Ok(Json(PutResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. A miss is reported in the body,
/// not as an error status.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<GetResponse> {
    // A hit moves the entry to the front
    let value = {
        let mut cache = state.cache.lock().await;
        cache.get(&key).cloned()
    };

    match value {
        Some(value) => Json(GetResponse::hit(key, value)),
        None => {
            debug!(%key, "cache miss");
            Json(GetResponse::miss(key))
        }
    }
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(capacity: usize) -> AppState {
        AppState::new(LruCache::new(capacity).unwrap())
    }

    fn put_request(key: &str, value: &str) -> Json<PutRequest> {
        Json(PutRequest {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let state = test_state(100);

        let result = put_handler(State(state.clone()), put_request("test_key", "test_value")).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string())).await;
        assert!(response.found);
        assert_eq!(response.value.as_deref(), Some("test_value"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state(100);

        let response = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(!response.found);
        assert!(response.value.is_none());
    }

    #[tokio::test]
    async fn test_put_evicts_least_recently_used() {
        let state = test_state(2);

        put_handler(State(state.clone()), put_request("a", "1")).await.unwrap();
        put_handler(State(state.clone()), put_request("b", "2")).await.unwrap();
        get_handler(State(state.clone()), Path("a".to_string())).await;
        put_handler(State(state.clone()), put_request("c", "3")).await.unwrap();

        assert!(get_handler(State(state.clone()), Path("a".to_string())).await.found);
        assert!(!get_handler(State(state.clone()), Path("b".to_string())).await.found);
        assert!(get_handler(State(state), Path("c".to_string())).await.found);
    }

    #[tokio::test]
    async fn test_concurrent_puts_share_one_cache() {
        let state = test_state(8);

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let state = state.clone();
                tokio::spawn(async move {
                    let key = format!("key{}", i);
                    put_handler(State(state), put_request(&key, "v")).await
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        let cache = state.cache.lock().await;
        assert_eq!(cache.len(), 8);
        assert!(cache.invariants_hold());
    }

    #[tokio::test]
    async fn test_put_invalid_request() {
        let state = test_state(100);

        let result = put_handler(State(state), put_request("", "value")).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_state_from_config() {
        let config = Config {
            capacity: 8,
            ..Config::default()
        };
        assert!(AppState::from_config(&config).is_ok());

        let config = Config {
            capacity: usize::MAX,
            ..Config::default()
        };
        assert!(AppState::from_config(&config).is_ok());

        let config = Config {
            capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            AppState::from_config(&config),
            Err(CacheError::InvalidCapacity(0))
        ));
    }
}
