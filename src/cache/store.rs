use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

use lru::LruCache;
use parking_lot::Mutex;

use crate::criteria::Criteria;
use crate::errors::QueryError;
use crate::value::Value;

use super::metrics::{CacheMetrics, CacheMetricsSnapshot};

/// LRU of compiled criteria keyed by the structural `Debug` form of the source value.
///
/// Capacity 0 disables storage; every lookup then compiles afresh.
pub struct CriteriaCache {
    store: Option<Mutex<LruCache<String, Arc<Criteria>>>>,
    max_depth: Option<usize>,
    metrics: CacheMetrics,
}

impl std::fmt::Debug for CriteriaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CriteriaCache")
            .field("len", &self.len())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl CriteriaCache {
    #[must_use]
    pub fn new(capacity: usize, max_depth: Option<usize>) -> Self {
        Self {
            store: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            max_depth,
            metrics: CacheMetrics::default(),
        }
    }

    /// Cached compile. Depth errors are returned and never cached.
    pub fn get_or_compile(&self, criteria: &Value) -> Result<Arc<Criteria>, QueryError> {
        let Some(store) = &self.store else {
            return self.compile(criteria).map(Arc::new);
        };
        let key = cache_key(criteria);
        if let Some(hit) = store.lock().get(&key) {
            self.metrics.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(hit));
        }
        self.metrics.misses.fetch_add(1, Ordering::Relaxed);
        let compiled = Arc::new(self.compile(criteria)?);
        let evicted = store.lock().push(key.clone(), Arc::clone(&compiled));
        self.metrics.inserts.fetch_add(1, Ordering::Relaxed);
        if evicted.is_some_and(|(old, _)| old != key) {
            self.metrics.evictions.fetch_add(1, Ordering::Relaxed);
            crate::utils::devlog::bench("cache", "lru_evict", &[("len", self.len() as u64)]);
        }
        Ok(compiled)
    }

    fn compile(&self, criteria: &Value) -> Result<Criteria, QueryError> {
        let start = Instant::now();
        let out = Criteria::compile_with_limit(criteria, self.max_depth);
        let ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.metrics.total_compile_ns.fetch_add(ns, Ordering::Relaxed);
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, |s| s.lock().len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Some(store) = &self.store {
            store.lock().clear();
        }
    }

    #[must_use]
    pub fn metrics(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Structural key. JSON would conflate `Date` with its ISO string and `Undefined` with `null`,
/// which compile differently. Records are `BTreeMap`s, so equal criteria give equal keys.
fn cache_key(criteria: &Value) -> String {
    format!("{criteria:?}")
}
