//! In-memory caching for API responses.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::clock::Clock;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Time-bounded memoization of GET responses.
///
/// Entries are valid while `now - stored_at < duration`. Expired entries are
/// removed lazily when their key is read; nothing sweeps the map, so it grows
/// until [`ResponseCache::clear`] is called.
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    duration: Duration,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    pub fn new(duration: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            duration,
            clock,
        }
    }

    pub fn get(&mut self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if self.clock.now().duration_since(entry.stored_at) < self.duration {
            return Some(entry.value.clone());
        }

        self.entries.remove(key);
        None
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let stored_at = self.clock.now();
        self.entries.insert(key.into(), CacheEntry { value, stored_at });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the cache key for a GET: the endpoint alone, or the endpoint
/// followed by its sorted, url-encoded parameters.
pub fn cache_key<'a, I>(endpoint: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let encoded = params
        .into_iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>();

    if encoded.is_empty() {
        endpoint.to_owned()
    } else {
        format!("{endpoint}:{}", encoded.join("&"))
    }
}
