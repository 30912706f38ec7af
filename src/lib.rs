//! Declarative criteria matching, multi-key sorting and paginated selection over in-memory
//! records.
//!
//! ```
//! use querylite::{FindQuery, SortSpec, Value, find_many, matches};
//! use serde_json::json;
//!
//! let people: Vec<Value> = vec![
//!     json!({"name": "ada", "age": 36}).into(),
//!     json!({"name": "alan", "age": 41}).into(),
//!     json!({"name": "kid", "age": 9}).into(),
//! ];
//! assert!(matches(&json!({"age": {"gte": 18}}).into(), &people[0]));
//!
//! let q = FindQuery::new(json!({"age": {"gte": 18}}).into()).order_by(SortSpec::new().desc("age"));
//! let page = find_many(&q, &people);
//! assert_eq!(page.data[0].get("name"), &Value::from("alan"));
//! assert_eq!(page.pagination.total_items, 2);
//! ```

pub mod cache;
pub mod config;
pub mod criteria;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod matcher;
pub mod query;
pub mod sort;
pub mod utils;
pub mod value;

#[doc(hidden)]
pub use log as __log;

pub use config::{EngineConfig, LoggingConfig, load_config};
pub use criteria::{Criteria, evaluate, explain};
pub use engine::Engine;
pub use errors::{Outcome, QueryError, Reason};
pub use matcher::{Matcher, matches};
pub use query::{
    Distinct, FindManyResult, FindQuery, PageInfo, PageRequest, count, decode, encode, find_first,
    find_many, find_unique, try_decode,
};
pub use sort::{Order, SortSpec, compare_records, compare_values, sort, sorted};
pub use value::{Record, Value};

mod built {
    include!(concat!(env!("OUT_DIR"), "/compiled_features.rs"));
}

/// Cargo features this build was compiled with.
#[must_use]
pub fn compiled_features() -> &'static [&'static str] {
    built::COMPILED_FEATURES
}

/// Load configuration (see [`load_config`]), set up logging from it, and build an [`Engine`].
///
/// Logging failures are reported on stderr and do not prevent the engine from being built.
#[must_use]
pub fn init(config_path: Option<&std::path::Path>) -> Engine {
    let cfg = load_config(config_path);
    if let Err(e) = logger::configure_from_config(&cfg.logging) {
        eprintln!("querylite: logging not configured: {e}");
    }
    log::info!("querylite {} features={:?}", env!("CARGO_PKG_VERSION"), compiled_features());
    Engine::new(cfg)
}
