mod metrics;
mod store;

pub use metrics::{CacheMetrics, CacheMetricsSnapshot};
pub use store::CriteriaCache;
