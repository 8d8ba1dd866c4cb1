//! Response cache implementation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// How much of the cache a successful write evicts.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvalidationScope {
    /// Flush every entry.
    #[default]
    Global,
    /// Flush only entries under the written path's top-level resource,
    /// e.g. a write to `/conversations/cnv_1/tags` evicts every
    /// `/conversations...` read and leaves `/teammates...` cached.
    Resource,
}

/// Configuration for the response cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct CacheConfig {
    /// Whether reads are cached at all
    #[serde(default = "default_enabled")]
    enabled: bool,

    /// Eviction scope applied after a successful write
    #[serde(default)]
    invalidation: InvalidationScope,
}

fn default_enabled() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            invalidation: InvalidationScope::default(),
        }
    }
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored
    pub entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to the upstream
    pub misses: u64,
    /// Invalidation passes triggered by writes
    pub invalidations: u64,
}

/// Top-level resource segment of a request path.
///
/// `"/conversations/cnv_1/messages?limit=5"` → `"conversations"`.
pub fn resource_root(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    let end = trimmed.find(['/', '?']).unwrap_or(trimmed.len());
    &trimmed[..end]
}

/// Cache of successful read responses.
///
/// # Example
///
/// ```
/// use frontdesk_cache::{CacheConfig, ResponseCache};
/// use serde_json::json;
///
/// let mut cache = ResponseCache::new(CacheConfig::default());
/// cache.insert("/conversations/cnv_1", json!({"id": "cnv_1"}));
///
/// assert_eq!(cache.get("/conversations/cnv_1"), Some(json!({"id": "cnv_1"})));
///
/// cache.invalidate_for_write("/conversations/cnv_1/tags");
/// assert!(cache.get("/conversations/cnv_1").is_none());
/// ```
#[derive(Debug)]
pub struct ResponseCache {
    config: CacheConfig,
    entries: HashMap<String, JsonValue>,
    hits: u64,
    misses: u64,
    invalidations: u64,
}

impl ResponseCache {
    /// Create an empty cache.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            enabled = config.enabled,
            invalidation = %config.invalidation,
            "Creating new ResponseCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
            invalidations: 0,
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Look up a cached response by its exact key.
    #[tracing::instrument(skip(self), fields(cache_size = self.entries.len()))]
    pub fn get(&mut self, key: &str) -> Option<JsonValue> {
        if !self.config.enabled {
            return None;
        }
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                tracing::debug!("Cache hit");
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                tracing::debug!("Cache miss");
                None
            }
        }
    }

    /// Store a successful read response.
    #[tracing::instrument(skip(self, value), fields(cache_size = self.entries.len()))]
    pub fn insert(&mut self, key: &str, value: JsonValue) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }
        self.entries.insert(key.to_string(), value);
    }

    /// Evict whatever a successful write to `path` may have made stale.
    ///
    /// Returns the number of entries removed.
    #[tracing::instrument(skip(self), fields(scope = %self.config.invalidation))]
    pub fn invalidate_for_write(&mut self, path: &str) -> usize {
        self.invalidations += 1;
        let before = self.entries.len();

        match self.config.invalidation {
            InvalidationScope::Global => self.entries.clear(),
            InvalidationScope::Resource => {
                let root = resource_root(path);
                self.entries.retain(|key, _| resource_root(key) != root);
            }
        }

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(
                removed,
                remaining = self.entries.len(),
                "Invalidated cached responses"
            );
        }
        removed
    }

    /// Clear all cache entries and counters.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
        self.invalidations = 0;
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            invalidations: self.invalidations,
        }
    }

    /// Get number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_root() {
        assert_eq!(resource_root("/conversations/cnv_1/messages"), "conversations");
        assert_eq!(resource_root("/conversations?q=open"), "conversations");
        assert_eq!(resource_root("teammates"), "teammates");
        assert_eq!(resource_root("/"), "");
    }

    #[test]
    fn test_keys_are_exact() {
        let mut cache = ResponseCache::default();
        cache.insert("/conversations?limit=5", json!([1]));
        assert!(cache.get("/conversations?limit=10").is_none());
        assert!(cache.get("/conversations/").is_none());
        assert_eq!(cache.get("/conversations?limit=5"), Some(json!([1])));
    }

    #[test]
    fn test_global_invalidation_clears_unrelated_entries() {
        let mut cache = ResponseCache::default();
        cache.insert("/conversations/cnv_1", json!({}));
        cache.insert("/teammates", json!([]));

        assert_eq!(cache.invalidate_for_write("/conversations/cnv_1"), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_resource_invalidation_keeps_other_resources() {
        let config = CacheConfig::default().with_invalidation(InvalidationScope::Resource);
        let mut cache = ResponseCache::new(config);
        cache.insert("/conversations/cnv_1", json!({}));
        cache.insert("/conversations?q=open", json!([]));
        cache.insert("/teammates", json!([]));

        assert_eq!(cache.invalidate_for_write("/conversations/cnv_2/tags"), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("/teammates").is_some());
    }

    #[test]
    fn test_disabled_cache_never_stores() {
        let mut cache = ResponseCache::new(CacheConfig::default().with_enabled(false));
        cache.insert("/teammates", json!([]));
        assert!(cache.get("/teammates").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stats_count_hits_and_misses() {
        let mut cache = ResponseCache::default();
        assert!(cache.get("/inboxes").is_none());
        cache.insert("/inboxes", json!([]));
        assert!(cache.get("/inboxes").is_some());
        cache.invalidate_for_write("/inboxes");

        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 0,
                hits: 1,
                misses: 1,
                invalidations: 1,
            }
        );
    }

    #[test]
    fn test_scope_from_toml() {
        let config: CacheConfig = toml::from_str("invalidation = \"resource\"\n").unwrap();
        assert_eq!(*config.invalidation(), InvalidationScope::Resource);
        assert!(*config.enabled());
    }
}
