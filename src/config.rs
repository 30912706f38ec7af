//! Engine configuration loaded from TOML with environment overrides.
//!
//! Precedence: explicit path > `QUERYLITE_CONFIG` > `./querylite.toml` > defaults, then the
//! `QUERYLITE_*` environment overrides on top (including the `QUERYLITE_LOG_*` logging keys).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::QueryError;
use crate::query::DEFAULT_PAGE_SIZE;

pub const DEFAULT_CACHE_CAPACITY: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Page size when a query gives neither `take` nor `pagination.size`.
    pub default_page_size: usize,
    /// Nesting limit for criteria records; `None` means unlimited.
    pub max_criteria_depth: Option<usize>,
    /// Compiled criteria kept in the LRU cache. 0 disables caching.
    pub criteria_cache_capacity: usize,
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_criteria_depth: None,
            criteria_cache_capacity: DEFAULT_CACHE_CAPACITY,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<PathBuf>,
    /// error|warn|info|debug|trace
    pub level: Option<String>,
    /// Rolled files to keep.
    pub retention: Option<usize>,
    /// Persist `dev6!` output to `dev6.log`.
    pub dev6: bool,
}

impl EngineConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, QueryError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, QueryError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| QueryError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Apply `QUERYLITE_DEFAULT_PAGE_SIZE`, `QUERYLITE_MAX_DEPTH`, `QUERYLITE_CACHE_CAPACITY`
    /// and the logging keys. Unparsable values are ignored with a warning.
    pub fn apply_env(&mut self) {
        if let Some(n) = env_usize("QUERYLITE_DEFAULT_PAGE_SIZE") {
            self.default_page_size = n;
        }
        if let Ok(raw) = std::env::var("QUERYLITE_MAX_DEPTH") {
            match raw.trim() {
                "" | "none" | "off" => self.max_criteria_depth = None,
                s => match s.parse::<usize>() {
                    Ok(n) => self.max_criteria_depth = Some(n),
                    Err(_) => log::warn!("ignoring QUERYLITE_MAX_DEPTH={raw:?}"),
                },
            }
        }
        if let Some(n) = env_usize("QUERYLITE_CACHE_CAPACITY") {
            self.criteria_cache_capacity = n;
        }
        self.logging.apply_env();
    }
}

impl LoggingConfig {
    /// Apply `QUERYLITE_LOG_DIR`, `QUERYLITE_LOG_LEVEL`, `QUERYLITE_LOG_RETENTION` and
    /// `QUERYLITE_DEV6` over the current values.
    pub fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("QUERYLITE_LOG_DIR") {
            self.dir = Some(PathBuf::from(dir));
        }
        if let Ok(level) = std::env::var("QUERYLITE_LOG_LEVEL") {
            self.level = Some(level);
        }
        if let Some(n) = env_usize("QUERYLITE_LOG_RETENTION") {
            self.retention = Some(n);
        }
        if let Ok(flag) = std::env::var("QUERYLITE_DEV6") {
            self.dev6 = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: not a non-negative integer");
            None
        }
    }
}

/// Candidate config files, highest precedence first.
#[must_use]
pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(p) = explicit {
        paths.push(p.to_path_buf());
    }
    if let Ok(p) = std::env::var("QUERYLITE_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("querylite.toml"));
    }
    paths
}

/// Load the first readable config file, then apply environment overrides.
#[must_use]
pub fn load_config(explicit: Option<&Path>) -> EngineConfig {
    let mut cfg = config_paths(explicit)
        .into_iter()
        .filter(|p| p.exists())
        .find_map(|p| match EngineConfig::from_file(&p) {
            Ok(cfg) => {
                log::info!("loaded config from {}", p.display());
                Some(cfg)
            }
            Err(e) => {
                log::warn!("skipping config {}: {e}", p.display());
                None
            }
        })
        .unwrap_or_default();
    cfg.apply_env();
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = EngineConfig::from_toml_str("max_criteria_depth = 8\n[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(cfg.default_page_size, 24);
        assert_eq!(cfg.max_criteria_depth, Some(8));
        assert_eq!(cfg.criteria_cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
        assert!(!cfg.logging.dev6);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(EngineConfig::from_toml_str("default_page_size = \"many\""), Err(QueryError::Toml(_))));
    }

    #[test]
    fn explicit_path_comes_first() {
        let p = Path::new("/tmp/explicit.toml");
        assert_eq!(config_paths(Some(p)).first().map(PathBuf::as_path), Some(p));
    }
}
