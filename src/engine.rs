use std::path::Path;
use std::sync::Arc;

use crate::cache::{CacheMetricsSnapshot, CriteriaCache};
use crate::config::{EngineConfig, load_config};
use crate::criteria::Criteria;
use crate::errors::QueryError;
use crate::matcher::Matcher;
use crate::query::{self, FindManyResult, FindQuery};
use crate::value::Value;

/// Configured query runner. Compiled criteria are cached across calls.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    cache: CriteriaCache,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let cache = CriteriaCache::new(config.criteria_cache_capacity, config.max_criteria_depth);
        Self { config, cache }
    }

    /// Build from [`load_config`].
    #[must_use]
    pub fn from_env(explicit: Option<&Path>) -> Self {
        Self::new(load_config(explicit))
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compile (or fetch) criteria, honouring the configured depth limit.
    pub fn compile(&self, criteria: &Value) -> Result<Arc<Criteria>, QueryError> {
        self.cache.get_or_compile(criteria)
    }

    pub fn matches(&self, criteria: &Value, record: &Value) -> bool {
        self.matcher(criteria).matches(record)
    }

    pub fn find_many(&self, query: &FindQuery, items: &[Value]) -> FindManyResult {
        query::find_many_with(&self.matcher(&query.filter), query, items, self.config.default_page_size)
    }

    pub fn find_unique(&self, query: &FindQuery, items: &[Value]) -> Option<Value> {
        query::find_unique_with(&self.matcher(&query.filter), query, items)
    }

    pub fn find_first(&self, query: &FindQuery, items: &[Value]) -> Option<Value> {
        query::find_first_with(&self.matcher(&query.filter), query, items)
    }

    pub fn count(&self, query: &FindQuery, items: &[Value]) -> usize {
        query::count_with(&self.matcher(&query.filter), query, items)
    }

    #[must_use]
    pub fn cache_metrics(&self) -> CacheMetricsSnapshot {
        self.cache.metrics()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Non-record or over-deep criteria yield a matcher that rejects everything.
    fn matcher(&self, criteria: &Value) -> Matcher {
        if criteria.as_record().is_none() {
            return Matcher::new(criteria);
        }
        match self.compile(criteria) {
            Ok(compiled) => Matcher::from_criteria(compiled),
            Err(e) => {
                log::warn!("criteria rejected: {e}");
                Matcher::new(&Value::Null)
            }
        }
    }
}
