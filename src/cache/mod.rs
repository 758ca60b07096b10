use std::fmt::Display;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

mod macros;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Fingerprint of a normalized suggestion request
    Suggestions(String),
    ImageUrl(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Suggestions(fingerprint) => write!(f, "suggest:{}", fingerprint),
            CacheKey::ImageUrl(title) => write!(f, "image:{}", title.to_lowercase()),
        }
    }
}

/// Process-local memo for derived values
///
/// Values are stored as JSON in an LRU map; once `capacity` entries are held
/// the least recently used one is evicted. Every cached value is a pure
/// function of its key, so entries never need to expire. A capacity of zero
/// disables caching.
#[derive(Clone)]
pub struct Cache {
    store: Option<Arc<RwLock<LruCache<String, String>>>>,
}

impl Cache {
    pub fn new(capacity: usize) -> Self {
        let store = NonZeroUsize::new(capacity)
            .map(|capacity| Arc::new(RwLock::new(LruCache::new(capacity))));
        Self { store }
    }

    /// Retrieves a value from the cache by key
    ///
    /// Returns `None` on a miss. A stored value that no longer deserializes
    /// into `T` is reported as an internal error.
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };

        // `get` bumps recency, hence the write lock
        let mut store = store.write().await;
        match store.get(&key.to_string()) {
            Some(json) => {
                let data = serde_json::from_str(json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Stores a value, evicting the least recently used entry when full
    ///
    /// Serialization failures are logged and the value is simply not cached.
    pub async fn set<T: serde::Serialize>(&self, key: &CacheKey, value: &T) {
        let Some(store) = &self.store else {
            return;
        };

        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Cache serialization error");
                return;
            }
        };

        let key = key.to_string();
        let mut store = store.write().await;
        if let Some((evicted, _)) = store.push(key.clone(), json) {
            if evicted != key {
                tracing::debug!(key = %evicted, "Evicted cache entry");
            }
        }
    }

    pub async fn len(&self) -> usize {
        match &self.store {
            Some(store) => store.read().await.len(),
            None => 0,
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
