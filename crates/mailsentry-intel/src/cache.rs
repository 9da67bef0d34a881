//! The TI store's bounded LRU (§4.4, §9 "global in-memory mapping cache"
//! re-architected as an explicit owned structure rather than module-level
//! state).

use lru::LruCache;
use std::num::NonZeroUsize;

/// What a positive lookup found, cached alongside negative (`None`)
/// results so repeated misses don't re-hit SQLite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorHit {
    pub threat_type: String,
    pub source: String,
}

pub const DEFAULT_CAPACITY: usize = 10_000;

/// A bounded LRU over `"domain:<key>"` / `"ip:<key>"` cache keys. On hit
/// the entry is promoted to most-recently-used; on miss the result
/// (positive or negative) is inserted and the LRU tail evicted if full.
pub struct ReputationCache {
    inner: LruCache<String, Option<IndicatorHit>>,
}

impl ReputationCache {
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            inner: LruCache::new(cap),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<Option<IndicatorHit>> {
        self.inner.get(key).cloned()
    }

    pub fn put(&mut self, key: String, value: Option<IndicatorHit>) {
        self.inner.put(key, value);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for ReputationCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotes_on_hit_and_evicts_least_recently_used() {
        let mut cache = ReputationCache::with_capacity(2);
        cache.put("domain:a".into(), None);
        cache.put("domain:b".into(), None);
        // Touch `a` so `b` becomes the least-recently-used entry.
        assert!(cache.get("domain:a").is_some());
        cache.put("domain:c".into(), None);
        assert!(cache.get("domain:b").is_none());
        assert!(cache.get("domain:a").is_some());
        assert!(cache.get("domain:c").is_some());
    }

    #[test]
    fn caches_negative_results_distinctly_from_absent() {
        let mut cache = ReputationCache::with_capacity(4);
        cache.put("domain:clean.test".into(), None);
        assert_eq!(cache.get("domain:clean.test"), Some(None));
        assert_eq!(cache.get("domain:unseen.test"), None);
    }
}
